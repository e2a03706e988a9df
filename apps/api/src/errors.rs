use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::conversation::ConversationError;
use crate::drafts::DraftStoreError;
use crate::layout::LayoutError;
use crate::suggestions::SuggestionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Conversation error: {0}")]
    Conversation(#[from] ConversationError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Suggestion error: {0}")]
    Suggestion(#[from] SuggestionError),

    #[error("Draft store error: {0}")]
    Drafts(#[from] DraftStoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Conversation(ConversationError::EmptyMessage) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Message cannot be empty".to_string(),
            ),
            AppError::Conversation(e @ ConversationError::UnknownTopic(_)) => {
                tracing::error!("Conversation defect: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONVERSATION_ERROR",
                    e.to_string(),
                )
            }
            AppError::Layout(LayoutError::UnknownTemplate(id)) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Template '{id}' not found"),
            ),
            AppError::Layout(e) => (StatusCode::BAD_REQUEST, "LAYOUT_ERROR", e.to_string()),
            AppError::Suggestion(SuggestionError::Disabled) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "AI_DISABLED",
                "AI suggestions are not configured".to_string(),
            ),
            AppError::Suggestion(e) => {
                tracing::error!("Suggestion error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "AI_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Drafts(e) => {
                tracing::error!("Draft store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(ConversationError::EmptyMessage.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ConversationError::UnknownTopic("x".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(LayoutError::InvalidItemsPerPage(0).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(LayoutError::UnknownTemplate("x".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(SuggestionError::Disabled.into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(AppError::Conflict("busy".into())),
            StatusCode::CONFLICT
        );
    }
}
