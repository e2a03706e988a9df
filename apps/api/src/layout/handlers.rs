//! Axum route handlers for templates and pagination.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::layout::{paginate, PageSet, Paginator, TemplateContent, TemplateDefinition};
use crate::models::ResumeRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginateRequest {
    pub record: ResumeRecord,
    /// Takes precedence over `items_per_page` when both are given.
    pub template_id: Option<String>,
    pub items_per_page: Option<i64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates(State(state): State<AppState>) -> Json<TemplateListResponse> {
    Json(TemplateListResponse {
        templates: state.templates.list().to_vec(),
    })
}

/// POST /api/v1/layout/paginate
///
/// Splits the record into pages using either a registered template or an
/// explicit capacity with one block per experience entry.
pub async fn handle_paginate(
    State(state): State<AppState>,
    Json(request): Json<PaginateRequest>,
) -> Result<Json<PageSet>, AppError> {
    let set = match (&request.template_id, request.items_per_page) {
        (Some(id), _) => {
            let template = state.templates.require(id)?;
            let content = TemplateContent::with_layout(&request.record, template.experience_layout);
            Paginator::new(template.items_per_page).paginate(&content)
        }
        (None, Some(n)) => paginate(&request.record, n)?,
        (None, None) => {
            return Err(AppError::Validation(
                "either templateId or itemsPerPage is required".to_string(),
            ))
        }
    };

    debug!(
        template = request.template_id.as_deref().unwrap_or("-"),
        blocks = set.block_count(),
        pages = ?set.page_sizes(),
        "record paginated"
    );
    Ok(Json(set))
}
