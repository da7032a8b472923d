use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use crate::domains::jobs::{
    derive_metadata, not_found_metadata, CanonicalJob, ListingRow, ListingView, Sector,
};
use crate::kernel::ServerDeps;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub sector: Option<String>,
}

/// GET /api/jobs - active jobs as listing rows, optionally by sector
pub async fn list_jobs_handler(
    Extension(deps): Extension<ServerDeps>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Vec<ListingRow>>, ApiError> {
    let sector = match query.sector.as_deref() {
        None | Some("") => None,
        Some(value) => Some(
            value
                .parse::<Sector>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        ),
    };

    let today = Utc::now().date_naive();
    let snapshot = deps.job_store.list_jobs().await?;
    let mut view = ListingView::new(sector);
    view.apply_snapshot(&snapshot, today);

    Ok(Json(view.rows(today)))
}

/// GET /api/jobs/:job_id - the canonical job
pub async fn get_job_handler(
    Extension(deps): Extension<ServerDeps>,
    Path(job_id): Path<String>,
) -> Result<Json<CanonicalJob>, ApiError> {
    let job = fetch_job(&deps, &job_id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(job))
}

/// GET /api/jobs/:job_id/metadata - head metadata for the job page
pub async fn job_metadata_handler(
    Extension(deps): Extension<ServerDeps>,
    Path(job_id): Path<String>,
) -> Result<Response, ApiError> {
    let response = match fetch_job(&deps, &job_id).await? {
        Some(job) => Json(derive_metadata(&job, &deps.metadata)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(not_found_metadata(&deps.metadata)),
        )
            .into_response(),
    };
    Ok(response)
}

async fn fetch_job(deps: &ServerDeps, job_id: &str) -> Result<Option<CanonicalJob>, ApiError> {
    let stored = deps.job_store.get_job(job_id).await?;
    if stored.is_none() {
        debug!(job_id, "Job not found");
    }
    Ok(stored.map(|stored| stored.to_canonical()))
}
