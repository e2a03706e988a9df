//! Draft load/save endpoints used by the form editor.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::ResumeRecord;
use crate::state::AppState;

/// GET /api/v1/drafts/:id
pub async fn handle_get_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRecord>, AppError> {
    let record = state
        .drafts
        .load(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Draft {id} not found")))?;
    Ok(Json(record))
}

/// PUT /api/v1/drafts/:id
pub async fn handle_put_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(record): Json<ResumeRecord>,
) -> Result<Json<ResumeRecord>, AppError> {
    state.drafts.save(id, &record).await?;
    Ok(Json(record))
}
