//! Draft persistence behind the `DraftStore` capability.
//!
//! `InMemoryDraftStore` is the default. `PgDraftStore` is used when
//! `DATABASE_URL` is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::ResumeRecord;

pub mod handlers;

#[derive(Debug, Error)]
pub enum DraftStoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn load(&self, id: Uuid) -> Result<Option<ResumeRecord>, DraftStoreError>;
    async fn save(&self, id: Uuid, record: &ResumeRecord) -> Result<(), DraftStoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryDraftStore {
    drafts: RwLock<HashMap<Uuid, ResumeRecord>>,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftStore for InMemoryDraftStore {
    async fn load(&self, id: Uuid) -> Result<Option<ResumeRecord>, DraftStoreError> {
        Ok(self.drafts.read().await.get(&id).cloned())
    }

    async fn save(&self, id: Uuid, record: &ResumeRecord) -> Result<(), DraftStoreError> {
        self.drafts.write().await.insert(id, record.clone());
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS resume_drafts (
        id UUID PRIMARY KEY,
        data JSONB NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

/// Stores each draft as one JSONB row keyed by session/draft id.
pub struct PgDraftStore {
    pool: PgPool,
}

impl PgDraftStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `resume_drafts` table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), DraftStoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        info!("resume_drafts table ready");
        Ok(())
    }
}

#[async_trait]
impl DraftStore for PgDraftStore {
    async fn load(&self, id: Uuid) -> Result<Option<ResumeRecord>, DraftStoreError> {
        let row: Option<Json<ResumeRecord>> =
            sqlx::query_scalar("SELECT data FROM resume_drafts WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|Json(record)| record))
    }

    async fn save(&self, id: Uuid, record: &ResumeRecord) -> Result<(), DraftStoreError> {
        sqlx::query(
            r#"
            INSERT INTO resume_drafts (id, data, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data, updated_at = now()
            "#,
        )
        .bind(id)
        .bind(Json(record))
        .execute(&self.pool)
        .await?;
        debug!(draft_id = %id, "draft saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_load_missing_is_none() {
        let store = InMemoryDraftStore::new();
        assert!(store.load(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_save_overwrites() {
        let store = InMemoryDraftStore::new();
        let id = Uuid::new_v4();
        let mut record = ResumeRecord::default();
        record.summary = "first".to_string();
        store.save(id, &record).await.unwrap();
        record.summary = "second".to_string();
        store.save(id, &record).await.unwrap();

        let loaded = store.load(id).await.unwrap().unwrap();
        assert_eq!(loaded.summary, "second");
    }
}
