use axum::{
    extract::Extension,
    http::header,
    response::IntoResponse,
};
use chrono::Utc;

use crate::domains::seo::{build_sitemap, render_robots, render_sitemap_xml};
use crate::kernel::ServerDeps;

/// GET /sitemap.xml
///
/// A store failure still yields the static routes so crawlers never get an
/// error page.
pub async fn sitemap_handler(Extension(deps): Extension<ServerDeps>) -> impl IntoResponse {
    let jobs = match deps.job_store.list_jobs().await {
        Ok(jobs) => jobs,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list jobs for sitemap");
            Vec::new()
        }
    };

    let entries = build_sitemap(&deps.metadata.canonical_base_url, &jobs, Utc::now());
    tracing::info!(job_routes = jobs.len(), "Sitemap generated");

    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_sitemap_xml(&entries),
    )
}

/// GET /robots.txt
pub async fn robots_handler(Extension(deps): Extension<ServerDeps>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_robots(&deps.metadata.canonical_base_url),
    )
}
