//! Server dependencies for route handlers (using traits for testability)

use std::sync::Arc;

use crate::domains::jobs::MetadataContext;
use crate::kernel::BaseJobStore;

/// Dependencies shared by every request.
#[derive(Clone)]
pub struct ServerDeps {
    pub job_store: Arc<dyn BaseJobStore>,
    /// Site-level inputs for page metadata, sitemap and robots.txt
    pub metadata: Arc<MetadataContext>,
}

impl ServerDeps {
    pub fn new(job_store: Arc<dyn BaseJobStore>, metadata: MetadataContext) -> Self {
        Self {
            job_store,
            metadata: Arc::new(metadata),
        }
    }
}
