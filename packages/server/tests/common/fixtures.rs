//! Job document fixtures shared by integration tests.

use portal_core::domains::jobs::RawJobRecord;
use portal_core::kernel::BaseJobStore;
use serde_json::{json, Value};

/// Unwrap a `json!` object literal into a raw job record.
pub fn document(value: Value) -> RawJobRecord {
    value
        .as_object()
        .cloned()
        .expect("fixture must be a JSON object")
}

/// Government posting in the fully nested shape, far from expiry.
pub fn ssc_job() -> RawJobRecord {
    document(json!({
        "title": "SSC Selection Posts Phase-XIII/2025",
        "jobTitle": "Various Posts",
        "category": "govt",
        "deadline": "2099-06-23",
        "postedDate": "2025-06-02T00:00:00Z",
        "applyLink": "https://ssc.nic.in/",
        "organization": { "conductedBy": "Staff Selection Commission (SSC)" },
        "postDetails": {
            "totalVacancies": 2423,
            "payScale": "Level-2: ₹19,900 – 63,200"
        },
        "eligibility": ["Matriculation", "Graduation"],
        "tableEligibilitySummary": "Matriculation to Graduation",
        "tableAgeLimitSummary": "18-30 years"
    }))
}

/// Private posting stored with flattened nested keys.
pub fn payu_job() -> RawJobRecord {
    document(json!({
        "title": "Graduate Trainee (PayU)",
        "sector": "Private",
        "deadline": "2099-07-31",
        "postedDate": "2025-06-18T00:00:00Z",
        "organization_conductedBy": "PayU",
        "postDetails_totalVacancies": "12",
        "eligibility": "[\"B.Tech\",\"MCA\"]"
    }))
}

/// Government posting whose deadline has passed.
pub fn expired_job() -> RawJobRecord {
    document(json!({
        "title": "Central Bank Apprentice",
        "category": "government",
        "deadline": "2020-01-01",
        "postedDate": "2019-12-01T00:00:00Z"
    }))
}

pub async fn seed(store: &dyn BaseJobStore, jobs: Vec<(&str, RawJobRecord)>) {
    for (id, document) in jobs {
        store
            .upsert_job(id, document)
            .await
            .expect("Failed to seed job");
    }
}
