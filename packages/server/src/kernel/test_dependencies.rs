// TestDependencies - store doubles for testing
//
// Provides stores that can be injected into ServerDeps for route tests.

use async_trait::async_trait;
use std::sync::Arc;

use super::{BaseJobStore, MemoryJobStore, ServerDeps, StoreError, StoreResult};
use crate::domains::jobs::{MetadataContext, RawJobRecord, StoredJob};

// =============================================================================
// Failing Job Store
// =============================================================================

/// Store whose every call fails, for exercising upstream-failure paths.
pub struct FailingJobStore {
    message: String,
}

impl FailingJobStore {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn error(&self) -> StoreError {
        StoreError::Unavailable(self.message.clone())
    }
}

impl Default for FailingJobStore {
    fn default() -> Self {
        Self::new("permission denied")
    }
}

#[async_trait]
impl BaseJobStore for FailingJobStore {
    async fn get_job(&self, _id: &str) -> StoreResult<Option<StoredJob>> {
        Err(self.error())
    }

    async fn list_jobs(&self) -> StoreResult<Vec<StoredJob>> {
        Err(self.error())
    }

    async fn upsert_job(&self, _id: &str, _document: RawJobRecord) -> StoreResult<StoredJob> {
        Err(self.error())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

pub struct TestDependencies {
    pub job_store: Arc<dyn BaseJobStore>,
    pub metadata: MetadataContext,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            job_store: Arc::new(MemoryJobStore::new()),
            metadata: MetadataContext::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            job_store: Arc::new(FailingJobStore::default()),
            metadata: MetadataContext::default(),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn BaseJobStore>) -> Self {
        self.job_store = store;
        self
    }

    pub fn into_server_deps(self) -> ServerDeps {
        ServerDeps::new(self.job_store, self.metadata)
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
