use std::sync::Arc;

use crate::ats::AtsScorer;
use crate::config::Config;
use crate::conversation::{ConversationEngine, SessionStore};
use crate::drafts::DraftStore;
use crate::layout::TemplateRegistry;
use crate::suggestions::SuggestionService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub engine: Arc<ConversationEngine>,
    pub sessions: Arc<SessionStore>,
    /// In-memory or PostgreSQL, chosen by `DATABASE_URL`.
    pub drafts: Arc<dyn DraftStore>,
    /// Also held by the engine; the suggestion endpoints call it directly.
    pub suggestions: Arc<dyn SuggestionService>,
    pub templates: Arc<TemplateRegistry>,
    /// Pluggable ATS scorer. Default: KeywordAtsScorer.
    pub ats_scorer: Arc<dyn AtsScorer>,
}
