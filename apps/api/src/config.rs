use std::time::Duration;

use anyhow::{Context, Result};

use crate::conversation::RecoveryMode;
use crate::suggestions::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Application configuration loaded from environment variables.
/// Everything has a default; optional services are disabled when unset.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub app_env: String,
    pub anthropic_api_key: Option<String>,
    pub ai_model: String,
    pub ai_base_url: String,
    pub database_url: Option<String>,
    /// Idle time after which an in-memory chat session is dropped.
    pub session_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            app_env: std::env::var("APP_ENV").unwrap_or_else(|_| "production".to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            ai_model: optional_env("AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            ai_base_url: optional_env("AI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            database_url: optional_env("DATABASE_URL"),
            session_ttl_secs: optional_env("SESSION_TTL_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("SESSION_TTL_SECS must be a whole number of seconds")?
                .unwrap_or(DEFAULT_SESSION_TTL_SECS),
        })
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn is_development(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("development")
    }

    /// Development fails loudly on conversation defects; everything else
    /// recovers.
    pub fn recovery_mode(&self) -> RecoveryMode {
        if self.is_development() {
            RecoveryMode::Strict
        } else {
            RecoveryMode::Lenient
        }
    }
}

/// Unset and blank both read as `None`.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(app_env: &str) -> Config {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            app_env: app_env.to_string(),
            anthropic_api_key: None,
            ai_model: DEFAULT_MODEL.to_string(),
            ai_base_url: DEFAULT_BASE_URL.to_string(),
            database_url: None,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }

    #[test]
    fn test_development_is_strict() {
        assert_eq!(config("development").recovery_mode(), RecoveryMode::Strict);
        assert_eq!(config("Development").recovery_mode(), RecoveryMode::Strict);
    }

    #[test]
    fn test_other_environments_are_lenient() {
        assert_eq!(config("production").recovery_mode(), RecoveryMode::Lenient);
        assert_eq!(config("staging").recovery_mode(), RecoveryMode::Lenient);
    }

    #[test]
    fn test_session_ttl_in_seconds() {
        assert_eq!(config("production").session_ttl(), Duration::from_secs(3600));
    }
}
