pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ats::handlers as ats;
use crate::conversation::handlers as chat;
use crate::drafts::handlers as drafts;
use crate::layout::handlers as layout;
use crate::state::AppState;
use crate::suggestions::handlers as suggestions;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Guided chat
        .route("/api/v1/chat/sessions", post(chat::handle_create_session))
        .route(
            "/api/v1/chat/sessions/:id",
            get(chat::handle_get_session).delete(chat::handle_delete_session),
        )
        .route(
            "/api/v1/chat/sessions/:id/messages",
            post(chat::handle_send_message),
        )
        // Templates and pagination
        .route("/api/v1/templates", get(layout::handle_list_templates))
        .route("/api/v1/layout/paginate", post(layout::handle_paginate))
        // Drafts
        .route(
            "/api/v1/drafts/:id",
            get(drafts::handle_get_draft).put(drafts::handle_put_draft),
        )
        // Export checks
        .route("/api/v1/resumes/validate", post(ats::handle_validate))
        .route("/api/v1/resumes/ats-score", post(ats::handle_ats_score))
        // AI suggestions
        .route(
            "/api/v1/suggestions/bullets",
            post(suggestions::handle_bullets),
        )
        .route(
            "/api/v1/suggestions/summary",
            post(suggestions::handle_summary),
        )
        .route(
            "/api/v1/suggestions/improve",
            post(suggestions::handle_improve),
        )
        .with_state(state)
}
