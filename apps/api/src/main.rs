mod ats;
mod config;
mod conversation;
mod db;
mod drafts;
mod errors;
mod layout;
mod models;
mod routes;
mod state;
mod suggestions;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ats::KeywordAtsScorer;
use crate::config::Config;
use crate::conversation::{ConversationEngine, SessionStore};
use crate::db::create_pool;
use crate::drafts::{DraftStore, InMemoryDraftStore, PgDraftStore};
use crate::layout::TemplateRegistry;
use crate::routes::build_router;
use crate::state::AppState;
use crate::suggestions::{AiClient, DisabledSuggestions, SuggestionService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resumate API v{}", env!("CARGO_PKG_VERSION"));

    // AI suggestions: disabled without a key, the chat falls back to local text
    let suggestions: Arc<dyn SuggestionService> = match &config.anthropic_api_key {
        Some(key) => {
            let client = AiClient::new(key.clone(), config.ai_model.clone(), &config.ai_base_url)?;
            info!("AI client initialized (model: {})", client.model());
            Arc::new(client)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set, AI suggestions disabled");
            Arc::new(DisabledSuggestions)
        }
    };

    // Draft persistence
    let drafts: Arc<dyn DraftStore> = match &config.database_url {
        Some(url) => {
            let store = PgDraftStore::new(create_pool(url).await?);
            store.ensure_schema().await?;
            Arc::new(store)
        }
        None => {
            info!("DATABASE_URL not set, drafts kept in memory");
            Arc::new(InMemoryDraftStore::new())
        }
    };

    let recovery = config.recovery_mode();
    info!("Conversation recovery mode: {recovery:?} (APP_ENV={})", config.app_env);

    let templates = TemplateRegistry::with_builtin()?;
    info!("{} templates registered", templates.list().len());

    let sessions = Arc::new(SessionStore::new());
    spawn_session_sweeper(sessions.clone(), config.session_ttl());

    let state = AppState {
        config: config.clone(),
        engine: Arc::new(ConversationEngine::new(suggestions.clone(), recovery)),
        sessions,
        drafts,
        suggestions,
        templates: Arc::new(templates),
        ats_scorer: Arc::new(KeywordAtsScorer),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drops chat sessions that have been idle for `ttl`.
fn spawn_session_sweeper(sessions: Arc<SessionStore>, ttl: Duration) {
    let period = (ttl / 4).max(Duration::from_secs(1));
    info!("Session idle timeout: {}s", ttl.as_secs());
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let evicted = sessions.evict_idle(ttl).await;
            if evicted > 0 {
                let remaining = sessions.len().await;
                info!(evicted, remaining, "evicted idle chat sessions");
            }
        }
    });
}
