pub mod canonical;
pub mod sector;
pub mod stored_job;

pub use canonical::*;
pub use sector::Sector;
pub use stored_job::StoredJob;
