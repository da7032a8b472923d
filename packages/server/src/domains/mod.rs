pub mod jobs;
pub mod seo;
