// HTTP routes
pub mod health;
pub mod jobs;
pub mod seo;

pub use health::*;
pub use jobs::*;
pub use seo::*;
