//! In-memory job store for development and tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;

use super::traits::{validate_job_id, BaseJobStore, StoreError, StoreResult};
use crate::domains::jobs::{RawJobRecord, StoredJob};

/// Job documents held in a map. Data is lost on restart.
#[derive(Default)]
pub struct MemoryJobStore {
    jobs: RwLock<HashMap<String, StoredJob>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.read().map(|jobs| jobs.len()).unwrap_or(0)
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".to_string())
}

#[async_trait]
impl BaseJobStore for MemoryJobStore {
    async fn get_job(&self, id: &str) -> StoreResult<Option<StoredJob>> {
        Ok(self.jobs.read().map_err(poisoned)?.get(id).cloned())
    }

    async fn list_jobs(&self) -> StoreResult<Vec<StoredJob>> {
        let mut jobs: Vec<StoredJob> = self.jobs.read().map_err(poisoned)?.values().cloned().collect();
        jobs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
        Ok(jobs)
    }

    async fn upsert_job(&self, id: &str, document: RawJobRecord) -> StoreResult<StoredJob> {
        validate_job_id(id)?;
        let stored = StoredJob::new(id, document, Utc::now());
        self.jobs
            .write()
            .map_err(poisoned)?
            .insert(id.to_string(), stored.clone());
        Ok(stored)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.jobs.read().map(|_| ()).map_err(poisoned)
    }
}
