//! Listing views over store snapshots.
//!
//! Each snapshot is normalized and filtered from scratch and replaces the
//! previous list wholesale; there is no incremental merge.

use chrono::NaiveDate;
use serde::Serialize;

use super::dates::parse_calendar_date;
use super::expiry::is_expired;
use super::models::{known, CanonicalJob, Sector, StoredJob, NOT_AVAILABLE};

/// Normalize stored jobs and keep the active ones in the requested sector.
pub fn active_listings(
    snapshot: &[StoredJob],
    sector: Option<Sector>,
    as_of: NaiveDate,
) -> Vec<CanonicalJob> {
    snapshot
        .iter()
        .map(StoredJob::to_canonical)
        .filter(|job| sector.map_or(true, |sector| job.sector_kind() == Some(sector)))
        .filter(|job| !is_expired(&job.deadline, as_of))
        .collect()
}

/// The current list behind a listing page.
#[derive(Debug, Clone, Default)]
pub struct ListingView {
    sector: Option<Sector>,
    jobs: Vec<CanonicalJob>,
}

impl ListingView {
    pub fn new(sector: Option<Sector>) -> Self {
        Self {
            sector,
            jobs: Vec::new(),
        }
    }

    /// Replace the list with the active jobs of a fresh snapshot.
    pub fn apply_snapshot(&mut self, snapshot: &[StoredJob], as_of: NaiveDate) {
        self.jobs = active_listings(snapshot, self.sector, as_of);
        tracing::debug!(
            sector = ?self.sector,
            received = snapshot.len(),
            active = self.jobs.len(),
            "Listing snapshot applied"
        );
    }

    pub fn jobs(&self) -> &[CanonicalJob] {
        &self.jobs
    }

    pub fn rows(&self, as_of: NaiveDate) -> Vec<ListingRow> {
        self.jobs.iter().map(|job| ListingRow::from_job(job, as_of)).collect()
    }
}

/// One row of the job listing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRow {
    pub id: String,
    pub title: String,
    pub category: Option<String>,
    pub eligibility_summary: String,
    pub age_limit: String,
    pub deadline: String,
    pub apply_link: String,
    pub expired: bool,
}

impl ListingRow {
    pub fn from_job(job: &CanonicalJob, as_of: NaiveDate) -> Self {
        let eligibility_summary = job
            .extra_text("tableEligibilitySummary")
            .map(str::to_string)
            .or_else(|| (!job.eligibility.is_empty()).then(|| job.eligibility.join(", ")))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let age_limit = job
            .extra_text("tableAgeLimitSummary")
            .or_else(|| job.extra_text("ageLimit"))
            .unwrap_or(NOT_AVAILABLE)
            .to_string();

        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            category: job.category.clone(),
            eligibility_summary,
            age_limit,
            deadline: display_deadline(&job.deadline),
            apply_link: job.apply_link.clone(),
            expired: is_expired(&job.deadline, as_of),
        }
    }
}

/// `Jun 23, 2025` for real dates; placeholders and free text pass through.
pub fn display_deadline(deadline: &str) -> String {
    match known(deadline).and_then(parse_calendar_date) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => deadline.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::{json, Value};

    fn stored(id: &str, document: Value) -> StoredJob {
        StoredJob::new(id, document.as_object().cloned().unwrap(), Utc::now())
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    fn snapshot() -> Vec<StoredJob> {
        vec![
            stored("ssc", json!({ "title": "SSC", "category": "govt", "deadline": "2025-07-15" })),
            stored("old", json!({ "title": "Old", "category": "govt", "deadline": "2025-06-23" })),
            stored("payu", json!({ "title": "PayU", "sector": "private", "deadline": "TBD" })),
            stored("bank", json!({ "title": "Bank", "category": "banking" })),
        ]
    }

    #[test]
    fn drops_expired_and_other_sectors() {
        let jobs = active_listings(&snapshot(), Some(Sector::Government), as_of());
        let ids: Vec<_> = jobs.iter().map(|job| job.id.as_str()).collect();
        assert_eq!(ids, vec!["ssc"]);
    }

    #[test]
    fn no_sector_keeps_every_active_job() {
        let jobs = active_listings(&snapshot(), None, as_of());
        let ids: Vec<_> = jobs.iter().map(|job| job.id.as_str()).collect();
        assert_eq!(ids, vec!["ssc", "payu", "bank"]);
    }

    #[test]
    fn snapshots_replace_the_list() {
        let mut view = ListingView::new(Some(Sector::Government));
        view.apply_snapshot(&snapshot(), as_of());
        assert_eq!(view.jobs().len(), 1);

        view.apply_snapshot(
            &[stored("upsc", json!({ "title": "UPSC", "sector": "Government" }))],
            as_of(),
        );
        assert_eq!(view.jobs().len(), 1);
        assert_eq!(view.jobs()[0].id, "upsc");

        view.apply_snapshot(&[], as_of());
        assert!(view.jobs().is_empty());
    }

    #[test]
    fn view_rows_follow_the_current_list() {
        let mut view = ListingView::new(None);
        view.apply_snapshot(&snapshot(), as_of());

        let rows = view.rows(as_of());
        let ids: Vec<_> = rows.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, vec!["ssc", "payu", "bank"]);
        assert_eq!(rows[0].deadline, "Jul 15, 2025");
        assert_eq!(rows[1].deadline, "TBD");
        assert!(rows.iter().all(|row| !row.expired));
    }

    #[test]
    fn row_prefers_table_summaries() {
        let job = stored(
            "ssc",
            json!({
                "title": "SSC Selection Posts",
                "category": "govt",
                "deadline": "2025-06-23",
                "eligibility": ["10th pass", "12th pass"],
                "tableAgeLimitSummary": "18-30 years",
            }),
        )
        .to_canonical();

        let row = ListingRow::from_job(&job, as_of());
        assert_eq!(row.eligibility_summary, "10th pass, 12th pass");
        assert_eq!(row.age_limit, "18-30 years");
        assert_eq!(row.deadline, "Jun 23, 2025");
        assert!(row.expired);
    }

    #[test]
    fn placeholder_deadlines_display_verbatim() {
        assert_eq!(display_deadline("TBD"), "TBD");
        assert_eq!(display_deadline("First week of July"), "First week of July");
    }
}
