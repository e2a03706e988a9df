//! Axum route handlers for the guided chat.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::conversation::session::{ChatSession, TurnReply};
use crate::conversation::state::ConversationState;
use crate::errors::AppError;
use crate::models::ResumeRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Both fields are optional. Supplying a state resumes a saved conversation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateSessionRequest {
    pub state: Option<ConversationState>,
    pub draft: Option<ResumeRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[serde(flatten)]
    pub session: ChatSession,
    pub progress_percent: u8,
}

impl From<ChatSession> for SessionResponse {
    fn from(session: ChatSession) -> Self {
        let progress_percent = session.state.progress_percent();
        Self {
            session,
            progress_percent,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/chat/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session = match request.state {
        Some(conversation) => {
            let draft = request
                .draft
                .unwrap_or_else(|| conversation.extracted_data.clone());
            ChatSession::resume(conversation, draft)
        }
        None => {
            let mut session = ChatSession::new();
            if let Some(draft) = request.draft {
                session.state.extracted_data = draft.clone();
                session.draft = draft;
            }
            session
        }
    };

    state.drafts.save(session.id, &session.draft).await?;
    info!(
        session_id = %session.id,
        topic = session.state.current_topic.as_str(),
        "chat session started"
    );

    let handle = state.sessions.insert(session).await;
    let snapshot = handle.lock().await.clone();
    Ok((StatusCode::CREATED, Json(snapshot.into())))
}

/// GET /api/v1/chat/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let handle = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;

    let snapshot = handle.lock().await.clone();
    Ok(Json(snapshot.into()))
}

/// DELETE /api/v1/chat/sessions/:id
///
/// Ends a session. The saved draft stays available under the same id.
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }
    info!(session_id = %id, "chat session closed");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/chat/sessions/:id/messages
///
/// Runs one turn. A second message sent while the first is still being
/// processed is rejected with 409.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<TurnReply>, AppError> {
    let handle = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;

    let mut session = handle.try_lock().map_err(|_| {
        AppError::Conflict(format!("Session {id} is still processing a message"))
    })?;

    let reply = session.submit(&state.engine, &request.content).await?;

    if let Err(e) = state.drafts.save(id, &session.draft).await {
        warn!(session_id = %id, error = %e, "draft save failed after turn");
    }

    Ok(Json(reply))
}
