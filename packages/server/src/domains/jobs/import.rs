//! Create-or-replace import of hand-authored job documents.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use super::dates::iso_instant;
use crate::kernel::BaseJobStore;

/// Outcome of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: Vec<String>,
    pub skipped: usize,
    pub failed: Vec<String>,
}

/// Upsert every document under its own `id`.
///
/// Documents without a string `id` are skipped. A missing `postedDate` is
/// stamped with `now`. A failing document is logged and the import carries
/// on with the rest.
pub async fn import_jobs(
    store: &dyn BaseJobStore,
    documents: Vec<Value>,
    now: DateTime<Utc>,
) -> ImportReport {
    let mut report = ImportReport::default();
    info!(count = documents.len(), "Starting job import");

    for (index, document) in documents.into_iter().enumerate() {
        let Value::Object(mut document) = document else {
            warn!(index, "Skipping job entry that is not an object");
            report.skipped += 1;
            continue;
        };

        let Some(id) = document.get("id").and_then(Value::as_str).map(str::to_string) else {
            warn!(index, "Skipping job without a string id");
            report.skipped += 1;
            continue;
        };

        if document.get("postedDate").map_or(true, Value::is_null) {
            document.insert("postedDate".to_string(), Value::String(iso_instant(now)));
        }

        let title = document
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("(untitled)")
            .to_string();

        match store.upsert_job(&id, document).await {
            Ok(_) => {
                info!(job_id = %id, title = %title, "Added/updated job");
                report.imported.push(id);
            }
            Err(e) => {
                error!(job_id = %id, title = %title, error = %e, "Failed to import job");
                report.failed.push(id);
            }
        }
    }

    info!(
        imported = report.imported.len(),
        skipped = report.skipped,
        failed = report.failed.len(),
        "Job import complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::FailingJobStore;
    use crate::kernel::MemoryJobStore;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 7, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_imports_and_stamps_posted_date() {
        let store = MemoryJobStore::new();
        let documents = vec![
            json!({ "id": "ssc", "title": "SSC", "postedDate": "2025-06-02T00:00:00Z" }),
            json!({ "id": "payu", "title": "PayU" }),
        ];

        let report = import_jobs(&store, documents, now()).await;

        assert_eq!(report.imported, vec!["ssc", "payu"]);
        let payu = store.get_job("payu").await.unwrap().unwrap();
        assert_eq!(payu.document["postedDate"], "2025-06-07T09:00:00.000Z");
        let ssc = store.get_job("ssc").await.unwrap().unwrap();
        assert_eq!(ssc.document["postedDate"], "2025-06-02T00:00:00Z");
    }

    #[tokio::test]
    async fn test_reimport_is_idempotent() {
        let store = MemoryJobStore::new();
        let documents = vec![json!({ "id": "ssc", "title": "SSC" })];

        import_jobs(&store, documents.clone(), now()).await;
        import_jobs(&store, documents, now()).await;

        assert_eq!(store.job_count(), 1);
    }

    #[tokio::test]
    async fn test_skips_entries_without_ids() {
        let store = MemoryJobStore::new();
        let documents = vec![json!({ "title": "No id" }), json!("not a job"), json!({ "id": 7 })];

        let report = import_jobs(&store, documents, now()).await;

        assert_eq!(report.skipped, 3);
        assert!(report.imported.is_empty());
        assert_eq!(store.job_count(), 0);
    }

    #[tokio::test]
    async fn test_store_failures_do_not_stop_the_import() {
        let store = FailingJobStore::default();
        let documents = vec![json!({ "id": "a" }), json!({ "id": "b" })];

        let report = import_jobs(&store, documents, now()).await;

        assert_eq!(report.failed, vec!["a", "b"]);
    }
}
