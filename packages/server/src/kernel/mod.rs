//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod memory_store;
pub mod postgres_store;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use memory_store::MemoryJobStore;
pub use postgres_store::PostgresJobStore;
pub use traits::{validate_job_id, BaseJobStore, StoreError, StoreResult};
