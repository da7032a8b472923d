// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Normalization and metadata derivation stay in domains/jobs and never
// touch a store.
//
// Naming convention: Base* for trait names (e.g., BaseJobStore)

use async_trait::async_trait;
use thiserror::Error;

use crate::domains::jobs::{RawJobRecord, StoredJob};

// =============================================================================
// Errors
// =============================================================================

/// Upstream store failures. "Not found" is never an error: reads return
/// `Ok(None)` for unknown ids.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store could not be reached or is in a bad state
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Database query failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Document rejected before it reached the store
    #[error("invalid job document {id}: {reason}")]
    InvalidDocument { id: String, reason: String },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

// =============================================================================
// Job Store Trait (Infrastructure - document storage)
// =============================================================================

#[async_trait]
pub trait BaseJobStore: Send + Sync {
    /// Fetch one job document. `Ok(None)` means not found.
    async fn get_job(&self, id: &str) -> StoreResult<Option<StoredJob>>;

    /// Every stored job, most recently updated first.
    async fn list_jobs(&self) -> StoreResult<Vec<StoredJob>>;

    /// Create or replace the whole document stored under `id`.
    async fn upsert_job(&self, id: &str, document: RawJobRecord) -> StoreResult<StoredJob>;

    /// Cheap reachability check for health endpoints.
    async fn ping(&self) -> StoreResult<()> {
        self.list_jobs().await.map(|_| ())
    }
}

/// Reject ids that cannot be used as a stable document key.
pub fn validate_job_id(id: &str) -> StoreResult<()> {
    if id.trim().is_empty() {
        return Err(StoreError::InvalidDocument {
            id: id.to_string(),
            reason: "id must not be blank".to_string(),
        });
    }
    if id.contains('/') {
        return Err(StoreError::InvalidDocument {
            id: id.to_string(),
            reason: "id must not contain '/'".to_string(),
        });
    }
    Ok(())
}
