//! Form-editor endpoints that expose the suggestion backend directly.
//! Unlike the chat flow, failures here surface to the caller.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::suggestions::{BulletPoints, ImprovedContent};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletsRequest {
    pub instruction: String,
    pub source_text: String,
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveRequest {
    pub field_type: String,
    pub content: String,
}

fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// POST /api/v1/suggestions/bullets
pub async fn handle_bullets(
    State(state): State<AppState>,
    Json(request): Json<BulletsRequest>,
) -> Result<Json<BulletPoints>, AppError> {
    require_text(&request.source_text, "sourceText")?;

    let bullets = state
        .suggestions
        .generate_bullet_points(&request.instruction, &request.source_text)
        .await?;
    Ok(Json(bullets))
}

/// POST /api/v1/suggestions/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    require_text(&request.prompt, "prompt")?;

    let summary = state.suggestions.improve_summary(&request.prompt).await?;
    Ok(Json(SummaryResponse { summary }))
}

/// POST /api/v1/suggestions/improve
pub async fn handle_improve(
    State(state): State<AppState>,
    Json(request): Json<ImproveRequest>,
) -> Result<Json<ImprovedContent>, AppError> {
    require_text(&request.content, "content")?;

    let improved = state
        .suggestions
        .improve_content(&request.field_type, &request.content)
        .await?;
    Ok(Json(improved))
}
