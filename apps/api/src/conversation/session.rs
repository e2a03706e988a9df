//! Chat sessions: conversation state, the running transcript and the draft
//! record, held in memory for the lifetime of the process.
//!
//! Each session sits behind its own `tokio::sync::Mutex`. A message submitted
//! while another is still being processed is rejected instead of queued, so
//! turns are applied strictly in submission order. Idle sessions are swept
//! out of the store periodically.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use uuid::Uuid;

use crate::conversation::engine::{ConversationEngine, ConversationError, ViewModeHint};
use crate::conversation::state::ConversationState;
use crate::conversation::topics::Topic;
use crate::models::{ChatMessage, ResumeRecord};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: Uuid,
    pub state: ConversationState,
    pub draft: ResumeRecord,
    /// Append-only.
    pub transcript: Vec<ChatMessage>,
    pub suggested_replies: Vec<String>,
    pub view_mode: ViewModeHint,
}

/// The assistant's side of one completed turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnReply {
    pub user_message: ChatMessage,
    pub ai_message: ChatMessage,
    pub suggested_replies: Vec<String>,
    pub view_mode: ViewModeHint,
    pub state: ConversationState,
    pub progress_percent: u8,
}

impl ChatSession {
    /// Starts a fresh session with the opening question already in the
    /// transcript.
    pub fn new() -> Self {
        Self::resume(ConversationState::new(), ResumeRecord::default())
    }

    /// Restores a session from a previously returned state and draft.
    pub fn resume(mut state: ConversationState, draft: ResumeRecord) -> Self {
        state.normalize();
        let topic = state.current_topic;
        let opening = if topic == Topic::Introduction {
            topic.question().to_string()
        } else {
            format!("Welcome back! {}", topic.question())
        };
        Self {
            id: Uuid::new_v4(),
            state,
            draft,
            transcript: vec![ChatMessage::ai(opening)],
            suggested_replies: topic.suggested_replies(),
            view_mode: ViewModeHint::Stay,
        }
    }

    /// Runs one user message through the engine and appends both sides of the
    /// exchange to the transcript. On error the session is left untouched.
    pub async fn submit(
        &mut self,
        engine: &ConversationEngine,
        text: &str,
    ) -> Result<TurnReply, ConversationError> {
        let outcome = engine.process_message(&self.state, &self.draft, text).await?;

        let user_message = ChatMessage::user(text.trim());
        let ai_message = ChatMessage::ai(outcome.reply);
        self.transcript.push(user_message.clone());
        self.transcript.push(ai_message.clone());
        self.state = outcome.state;
        self.draft = outcome.draft;
        self.suggested_replies = outcome.suggested_replies;
        self.view_mode = outcome.view_mode;

        Ok(TurnReply {
            user_message,
            ai_message,
            suggested_replies: self.suggested_replies.clone(),
            view_mode: self.view_mode,
            state: self.state.clone(),
            progress_percent: self.state.progress_percent(),
        })
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

struct SessionEntry {
    handle: Arc<Mutex<ChatSession>>,
    last_active: Instant,
}

impl SessionEntry {
    fn new(handle: Arc<Mutex<ChatSession>>) -> Self {
        Self {
            handle,
            last_active: Instant::now(),
        }
    }
}

/// Live sessions keyed by id. Entries are dropped explicitly through
/// [`SessionStore::remove`] or by [`SessionStore::evict_idle`] once they have
/// not been touched for the configured idle time.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: ChatSession) -> Arc<Mutex<ChatSession>> {
        let id = session.id;
        let handle = Arc::new(Mutex::new(session));
        self.sessions
            .write()
            .await
            .insert(id, SessionEntry::new(handle.clone()));
        handle
    }

    /// Looks a session up and marks it as active.
    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<ChatSession>>> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_active = Instant::now();
        Some(entry.handle.clone())
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Drops every session idle for at least `ttl`. A session with a turn in
    /// flight is kept. Returns how many were removed.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            entry.last_active.elapsed() < ttl || entry.handle.try_lock().is_err()
        });
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::engine::RecoveryMode;
    use crate::models::Sender;
    use crate::suggestions::DisabledSuggestions;

    fn engine() -> ConversationEngine {
        ConversationEngine::new(Arc::new(DisabledSuggestions), RecoveryMode::Strict)
    }

    #[test]
    fn test_new_session_opens_with_question() {
        let session = ChatSession::new();
        assert_eq!(session.transcript.len(), 1);
        assert_eq!(session.transcript[0].sender, Sender::Ai);
        assert_eq!(session.transcript[0].content, Topic::Introduction.question());
    }

    #[test]
    fn test_resumed_session_welcomes_back() {
        let mut state = ConversationState::new();
        state.advance_topic();
        let session = ChatSession::resume(state, ResumeRecord::default());
        assert!(session.transcript[0].content.starts_with("Welcome back!"));
    }

    #[tokio::test]
    async fn test_submit_appends_both_messages() {
        let mut session = ChatSession::new();
        let reply = session
            .submit(&engine(), "I'm Alex and I'm looking for a backend role")
            .await
            .unwrap();
        assert_eq!(session.transcript.len(), 3);
        assert_eq!(session.transcript[1].sender, Sender::User);
        assert_eq!(session.transcript[2].id, reply.ai_message.id);
        assert_eq!(session.state.current_topic, Topic::PersonalInfo);
        assert_eq!(session.draft.personal_info.full_name.as_deref(), Some("Alex"));
        assert!(reply.progress_percent > 0);
    }

    #[tokio::test]
    async fn test_failed_submit_leaves_session_untouched() {
        let mut session = ChatSession::new();
        let err = session.submit(&engine(), "  ").await.unwrap_err();
        assert_eq!(err, ConversationError::EmptyMessage);
        assert_eq!(session.transcript.len(), 1);
    }

    #[tokio::test]
    async fn test_store_round_trip_and_busy_guard() {
        let store = SessionStore::new();
        let session = ChatSession::new();
        let id = session.id;
        store.insert(session).await;
        assert_eq!(store.len().await, 1);

        let handle = store.get(id).await.unwrap();
        let _guard = handle.try_lock().unwrap();
        let again = store.get(id).await.unwrap();
        assert!(again.try_lock().is_err(), "second in-flight turn must be refused");
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_resume_with_empty_pending_still_advances() {
        let state: ConversationState = serde_json::from_str(
            r#"{"currentTopic":"skills","pendingTopics":[],"completedTopics":[]}"#,
        )
        .unwrap();
        let mut session = ChatSession::resume(state, ResumeRecord::default());
        session.submit(&engine(), "Rust, Go").await.unwrap();
        assert_eq!(session.state.current_topic, Topic::Challenges);
        assert_eq!(session.draft.skills, vec!["Rust", "Go"]);
    }

    #[tokio::test]
    async fn test_remove_drops_session() {
        let store = SessionStore::new();
        let session = ChatSession::new();
        let id = session.id;
        store.insert(session).await;

        assert!(store.remove(id).await);
        assert!(!store.remove(id).await);
        assert!(store.get(id).await.is_none());
    }

    #[tokio::test]
    async fn test_evict_idle_removes_only_stale_sessions() {
        tokio::time::pause();
        let store = SessionStore::new();
        let stale = ChatSession::new();
        let stale_id = stale.id;
        store.insert(stale).await;

        tokio::time::advance(Duration::from_secs(50)).await;
        let fresh = ChatSession::new();
        let fresh_id = fresh.id;
        store.insert(fresh).await;

        tokio::time::advance(Duration::from_secs(20)).await;
        assert_eq!(store.evict_idle(Duration::from_secs(60)).await, 1);
        assert!(store.get(stale_id).await.is_none());
        assert!(store.get(fresh_id).await.is_some());
    }

    #[tokio::test]
    async fn test_get_refreshes_activity_and_busy_sessions_survive() {
        tokio::time::pause();
        let store = SessionStore::new();
        let touched = ChatSession::new();
        let touched_id = touched.id;
        store.insert(touched).await;
        let busy = ChatSession::new();
        let busy_id = busy.id;
        let busy_handle = store.insert(busy).await;

        tokio::time::advance(Duration::from_secs(50)).await;
        store.get(touched_id).await.unwrap();
        let _guard = busy_handle.try_lock().unwrap();

        tokio::time::advance(Duration::from_secs(20)).await;
        assert_eq!(store.evict_idle(Duration::from_secs(60)).await, 0);
        assert_eq!(store.len().await, 2);
        assert!(store.get(busy_id).await.is_some());
    }
}
