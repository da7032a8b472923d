use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::canonical::CanonicalJob;
use crate::domains::jobs::normalizer::{normalize, RawJobRecord};

/// A job document as held by the store, keyed by a caller-chosen id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredJob {
    pub id: String,
    pub document: RawJobRecord,
    pub updated_at: DateTime<Utc>,
}

impl StoredJob {
    pub fn new(id: impl Into<String>, document: RawJobRecord, updated_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            document,
            updated_at,
        }
    }

    /// Normalize the document. The store's id wins over any `id` key
    /// inside the document.
    pub fn to_canonical(&self) -> CanonicalJob {
        let mut job = normalize(&self.document);
        job.id = self.id.clone();
        job
    }
}
