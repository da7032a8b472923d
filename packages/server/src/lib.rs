// Job Portal - API Core
//
// This crate normalizes loosely-shaped job documents into a canonical model,
// derives page metadata and JobPosting structured data from it, and serves
// both over HTTP alongside listings, a sitemap and robots.txt.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
