//! HTTP route tests against the in-memory and failing stores.

mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use common::{expired_job, payu_job, seed, ssc_job};
use portal_core::kernel::test_dependencies::TestDependencies;
use portal_core::kernel::MemoryJobStore;
use portal_core::server::build_app;
use serde_json::Value;
use tower::ServiceExt;

async fn seeded_app() -> Router {
    let store = Arc::new(MemoryJobStore::new());
    seed(
        store.as_ref(),
        vec![
            ("ssc-2025", ssc_job()),
            ("payu-2025", payu_job()),
            ("bank-2020", expired_job()),
        ],
    )
    .await;

    let deps = TestDependencies::new().with_store(store).into_server_deps();
    build_app(deps, Vec::new())
}

fn failing_app() -> Router {
    build_app(TestDependencies::failing().into_server_deps(), Vec::new())
}

async fn get(app: Router, uri: &str) -> (StatusCode, String, Option<String>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap(), content_type)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body, _) = get(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

// =============================================================================
// Job detail
// =============================================================================

#[tokio::test]
async fn job_detail_returns_canonical_job() {
    let (status, body) = get_json(seeded_app().await, "/api/jobs/payu-2025").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "payu-2025");
    assert_eq!(body["organization"]["conductedBy"], "PayU");
    assert_eq!(body["postDetails"]["totalVacancies"], 12);
    assert_eq!(body["applicationFee"]["fee"], "N/A");
    assert!(body.get("organization_conductedBy").is_none());
}

#[tokio::test]
async fn unknown_job_is_not_found() {
    let (status, body) = get_json(seeded_app().await, "/api/jobs/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Job not found");
}

#[tokio::test]
async fn store_failure_is_not_reported_as_not_found() {
    let (status, body) = get_json(failing_app(), "/api/jobs/ssc-2025").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal Server Error");
}

// =============================================================================
// Metadata
// =============================================================================

#[tokio::test]
async fn metadata_includes_structured_data() {
    let (status, body) = get_json(seeded_app().await, "/api/jobs/ssc-2025/metadata").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Various Posts");
    assert_eq!(
        body["canonicalUrl"],
        "https://www.jobvacancy.com/jobs/ssc-2025"
    );
    assert_eq!(body["structuredData"]["validThrough"], "2099-06-23");
    assert_eq!(body["structuredData"]["identifier"]["value"], "ssc-2025");
    assert_eq!(body["structuredData"]["baseSalary"]["value"]["value"], "19900");
}

#[tokio::test]
async fn metadata_for_unknown_job_is_not_found_page() {
    let (status, body) = get_json(seeded_app().await, "/api/jobs/missing/metadata").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Job Not Found | Job Vacancy Hub");
    assert_eq!(body["structuredData"], Value::Null);
}

#[tokio::test]
async fn metadata_store_failure_is_server_error() {
    let (status, _) = get_json(failing_app(), "/api/jobs/ssc-2025/metadata").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// Listings
// =============================================================================

#[tokio::test]
async fn listing_hides_expired_jobs() {
    let (status, body) = get_json(seeded_app().await, "/api/jobs").await;

    assert_eq!(status, StatusCode::OK);
    let mut ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_str().unwrap())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["payu-2025", "ssc-2025"]);
}

#[tokio::test]
async fn listing_filters_by_sector() {
    let (status, body) = get_json(seeded_app().await, "/api/jobs?sector=government").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "ssc-2025");
    assert_eq!(rows[0]["eligibilitySummary"], "Matriculation to Graduation");
    assert_eq!(rows[0]["ageLimit"], "18-30 years");
    assert_eq!(rows[0]["deadline"], "Jun 23, 2099");
    assert_eq!(rows[0]["expired"], false);
}

#[tokio::test]
async fn listing_rejects_unknown_sector() {
    let (status, body) = get_json(seeded_app().await, "/api/jobs?sector=banking").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("banking"));
}

#[tokio::test]
async fn listing_store_failure_is_server_error() {
    let (status, _) = get_json(failing_app(), "/api/jobs").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// Crawlers
// =============================================================================

#[tokio::test]
async fn sitemap_lists_every_stored_job() {
    let (status, body, content_type) = get(seeded_app().await, "/sitemap.xml").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("application/xml"));
    assert!(body.contains("<loc>https://www.jobvacancy.com</loc>"));
    assert!(body.contains("<loc>https://www.jobvacancy.com/jobs/government</loc>"));
    for id in ["ssc-2025", "payu-2025", "bank-2020"] {
        assert!(body.contains(&format!("<loc>https://www.jobvacancy.com/jobs/{id}</loc>")));
    }
}

#[tokio::test]
async fn sitemap_survives_store_failure() {
    let (status, body, _) = get(failing_app(), "/sitemap.xml").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("<url>").count(), 2);
}

#[tokio::test]
async fn sitemap_encodes_job_ids() {
    let store = Arc::new(MemoryJobStore::new());
    seed(store.as_ref(), vec![("clerk 2025", ssc_job())]).await;
    let app = build_app(
        TestDependencies::new().with_store(store).into_server_deps(),
        Vec::new(),
    );

    let (status, body, _) = get(app, "/sitemap.xml").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<loc>https://www.jobvacancy.com/jobs/clerk%202025</loc>"));
}

#[tokio::test]
async fn robots_points_at_sitemap() {
    let (status, body, _) = get(seeded_app().await, "/robots.txt").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sitemap: https://www.jobvacancy.com/sitemap.xml"));
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_store_status() {
    let (status, body) = get_json(seeded_app().await, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get_json(failing_app(), "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["store"]["status"], "error");
}
