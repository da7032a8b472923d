pub mod dates;
pub mod expiry;
pub mod import;
pub mod listing;
pub mod metadata;
pub mod models;
pub mod normalizer;

// Re-export the read pipeline
pub use expiry::{is_expired, is_expired_today};
pub use import::{import_jobs, ImportReport};
pub use listing::{active_listings, ListingRow, ListingView};
pub use metadata::{derive_metadata, not_found_metadata, MetadataContext, PageMetadata};
pub use normalizer::{normalize, normalize_at, normalize_value, RawJobRecord};

// Re-export models
pub use models::{CanonicalJob, Sector, StoredJob};
