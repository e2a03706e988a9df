//! AI suggestion collaborators: bullet generation, summary writing and
//! single-field improvement.
//!
//! The conversation engine and the HTTP handlers only ever see the
//! `SuggestionService` trait. `AiClient` is the production backend;
//! `DisabledSuggestions` stands in when no API key is configured.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod client;
pub mod handlers;
pub mod prompts;

pub use client::AiClient;

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Model returned empty content")]
    EmptyContent,

    #[error("Model returned no bullet points")]
    NoBullets,

    #[error("AI suggestions are disabled (no API key configured)")]
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletPoints {
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovedContent {
    pub improved_content: String,
}

/// Text-generation backend used to polish resume content.
///
/// Every method may fail; callers inside the chat flow substitute a
/// deterministic fallback instead of surfacing the error.
#[async_trait]
pub trait SuggestionService: Send + Sync {
    /// Turns narrative text into resume bullet lines. On success at least one
    /// bullet is returned.
    async fn generate_bullet_points(
        &self,
        instruction: &str,
        source_text: &str,
    ) -> Result<BulletPoints, SuggestionError>;

    /// Writes a professional summary from accumulated context.
    async fn improve_summary(&self, prompt_text: &str) -> Result<String, SuggestionError>;

    /// Rewrites a single field (summary, bullet, achievement, ...).
    async fn improve_content(
        &self,
        field_type: &str,
        content: &str,
    ) -> Result<ImprovedContent, SuggestionError>;
}

/// Backend used when the service runs without AI credentials.
pub struct DisabledSuggestions;

#[async_trait]
impl SuggestionService for DisabledSuggestions {
    async fn generate_bullet_points(
        &self,
        _instruction: &str,
        _source_text: &str,
    ) -> Result<BulletPoints, SuggestionError> {
        Err(SuggestionError::Disabled)
    }

    async fn improve_summary(&self, _prompt_text: &str) -> Result<String, SuggestionError> {
        Err(SuggestionError::Disabled)
    }

    async fn improve_content(
        &self,
        _field_type: &str,
        _content: &str,
    ) -> Result<ImprovedContent, SuggestionError> {
        Err(SuggestionError::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improved_content_uses_camel_case() {
        let json = r#"{"improvedContent": "Led a team of 5"}"#;
        let parsed: ImprovedContent = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.improved_content, "Led a team of 5");
    }

    #[tokio::test]
    async fn test_disabled_backend_always_fails() {
        let svc = DisabledSuggestions;
        assert!(matches!(
            svc.generate_bullet_points("x", "y").await,
            Err(SuggestionError::Disabled)
        ));
        assert!(svc.improve_summary("x").await.is_err());
        assert!(svc.improve_content("summary", "x").await.is_err());
    }
}
