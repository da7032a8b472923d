// Search-engine facing documents (sitemap, robots.txt)

pub mod robots;
pub mod sitemap;

pub use robots::render_robots;
pub use sitemap::{build_sitemap, render_sitemap_xml, ChangeFrequency, SitemapEntry};
