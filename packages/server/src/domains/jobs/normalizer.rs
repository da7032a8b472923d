//! Job record normalization.
//!
//! Turns an untrusted job document into a [`CanonicalJob`]. Every shape
//! coercion in the crate lives here so page, listing and metadata code only
//! ever see the canonical model.
//!
//! Nested groups (`organization`, `postDetails`, `applicationFee`,
//! `jobLocation.address`) resolve each field in one order:
//!
//! 1. the key inside the nested object (then its documented aliases)
//! 2. the flattened column `parent_childKey` left by relational storage
//! 3. the default (`N/A`, `0`, or `IN` for the country)
//!
//! Flattened columns never survive into the canonical job.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::dates::{iso_date, iso_instant, parse_instant};
use super::models::{
    ApplicationFee, CanonicalJob, JobLocation, Organization, PostDetails, PostalAddress,
    DEADLINE_TBD, DEFAULT_COUNTRY, DEFAULT_TITLE, NOT_AVAILABLE,
};

/// Untrusted job document as stored or produced by an extractor.
pub type RawJobRecord = Map<String, Value>;

/// Prefixes of flattened nested columns (`organization_conductedBy`, ...).
const FLATTENED_PREFIXES: [&str; 4] = [
    "organization_",
    "postDetails_",
    "applicationFee_",
    "jobLocation_",
];

/// Top-level keys consumed into typed canonical fields.
const CANONICAL_KEYS: [&str; 24] = [
    "id",
    "title",
    "jobTitle",
    "description",
    "category",
    "sector",
    "subcategory",
    "organization",
    "postDetails",
    "applicationFee",
    "jobLocation",
    "eligibility",
    "selectionProcess",
    "examCenters",
    "importantInstructions",
    "howToApply",
    "responsibilities",
    "deadline",
    "postedDate",
    "applyLink",
    "employmentType",
    "ogImage",
    "twitterImage",
    "location",
];

/// Normalize any JSON value. Anything but an object is the "no job" sentinel.
pub fn normalize_value(raw: &Value) -> Option<CanonicalJob> {
    match raw {
        Value::Object(record) => Some(normalize(record)),
        Value::Null => None,
        other => {
            debug!(kind = value_kind(other), "Job record is not an object, treating as missing");
            None
        }
    }
}

/// Normalize a job document. Never fails.
///
/// A missing `postedDate` falls back to the current instant; this is a
/// display default and is not written back anywhere.
pub fn normalize(raw: &RawJobRecord) -> CanonicalJob {
    normalize_at(raw, Utc::now())
}

/// [`normalize`] with an explicit "now" for the `postedDate` fallback.
pub fn normalize_at(raw: &RawJobRecord, now: DateTime<Utc>) -> CanonicalJob {
    let title = text(raw.get("title"))
        .or_else(|| text(raw.get("jobTitle")))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let job_title = text(raw.get("jobTitle")).unwrap_or_else(|| title.clone());

    let mut responsibilities = sequence("responsibilities", raw.get("responsibilities"));
    if responsibilities.is_empty() {
        let nested = raw
            .get("postDetails")
            .and_then(Value::as_object)
            .and_then(|details| details.get("responsibilities"));
        responsibilities = sequence("postDetails.responsibilities", nested);
    }

    CanonicalJob {
        id: text(raw.get("id")).unwrap_or_default(),
        title,
        job_title,
        description: text(raw.get("description")),
        category: text(raw.get("category")),
        sector: text(raw.get("sector")),
        subcategory: text(raw.get("subcategory")),
        organization: organization(raw),
        post_details: post_details(raw),
        application_fee: application_fee(raw),
        job_location: JobLocation {
            address: address(raw),
        },
        eligibility: sequence("eligibility", raw.get("eligibility")),
        selection_process: sequence("selectionProcess", raw.get("selectionProcess")),
        exam_centers: sequence("examCenters", raw.get("examCenters")),
        important_instructions: sequence(
            "importantInstructions",
            raw.get("importantInstructions"),
        ),
        how_to_apply: sequence("howToApply", raw.get("howToApply")),
        responsibilities,
        deadline: deadline(raw.get("deadline")),
        posted_date: posted_date(raw.get("postedDate"), now),
        apply_link: text(raw.get("applyLink")).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        employment_type: text(raw.get("employmentType")),
        og_image: text(raw.get("ogImage")),
        twitter_image: text(raw.get("twitterImage")),
        location: text(raw.get("location")),
        extra: carried_fields(raw),
    }
}

// =============================================================================
// Nested groups
// =============================================================================

/// One nested group with its flattened fallback.
struct FieldGroup<'a> {
    nested: Option<&'a Map<String, Value>>,
    flat: &'a RawJobRecord,
    prefix: &'static str,
}

impl<'a> FieldGroup<'a> {
    fn new(raw: &'a RawJobRecord, path: &[&str], prefix: &'static str) -> Self {
        let nested = path
            .iter()
            .try_fold(raw, |map, key| map.get(*key)?.as_object());
        Self {
            nested,
            flat: raw,
            prefix,
        }
    }

    /// Candidate values in resolution order. `keys[0]` is the canonical key,
    /// the rest are aliases only honoured inside the nested object.
    fn candidates(&self, keys: &[&str]) -> Vec<&'a Value> {
        let mut found = Vec::new();
        if let Some(nested) = self.nested {
            found.extend(keys.iter().filter_map(|key| nested.get(*key)));
        }
        if let Some(primary) = keys.first() {
            let flat_key = format!("{}{}", self.prefix, primary);
            found.extend(self.flat.get(&flat_key));
        }
        found
    }

    fn text(&self, keys: &[&str]) -> String {
        self.candidates(keys)
            .into_iter()
            .find_map(|value| text(Some(value)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    fn count(&self, key: &str) -> i64 {
        self.candidates(&[key])
            .into_iter()
            .find_map(integer)
            .unwrap_or(0)
    }
}

fn organization(raw: &RawJobRecord) -> Organization {
    let group = FieldGroup::new(raw, &["organization"], "organization_");
    Organization {
        conducted_by: group.text(&["conductedBy", "hiringBody", "company"]),
        location: group.text(&["location"]),
        advertisement_no: group.text(&["advertisementNo"]),
        application_mode: group.text(&["applicationMode"]),
        last_date_to_apply: group.text(&["lastDateToApply"]),
    }
}

fn post_details(raw: &RawJobRecord) -> PostDetails {
    let group = FieldGroup::new(raw, &["postDetails"], "postDetails_");
    PostDetails {
        post_name: group.text(&["postName"]),
        total_vacancies: group.count("totalVacancies"),
        ur: group.count("ur"),
        obc: group.count("obc"),
        sc: group.count("sc"),
        st: group.count("st"),
        ewc: group.count("ewc"),
        group: group.text(&["group"]),
        pay_scale: group.text(&["payScale"]),
        additional_benefits: group.text(&["additionalBenefits"]),
    }
}

fn application_fee(raw: &RawJobRecord) -> ApplicationFee {
    let group = FieldGroup::new(raw, &["applicationFee"], "applicationFee_");
    ApplicationFee {
        fee: group.text(&["fee", "feePayable"]),
        exempted_categories: group.text(&["exemptedCategories", "exemptions"]),
        payment_mode: group.text(&["paymentMode"]),
    }
}

fn address(raw: &RawJobRecord) -> PostalAddress {
    let group = FieldGroup::new(raw, &["jobLocation", "address"], "jobLocation_address_");
    let country = group.text(&["addressCountry"]);
    PostalAddress {
        street_address: group.text(&["streetAddress"]),
        address_locality: group.text(&["addressLocality"]),
        address_region: group.text(&["addressRegion"]),
        postal_code: group.text(&["postalCode"]),
        address_country: if country == NOT_AVAILABLE {
            DEFAULT_COUNTRY.to_string()
        } else {
            country
        },
    }
}

/// Everything not consumed into a typed field, minus flattened columns.
fn carried_fields(raw: &RawJobRecord) -> Map<String, Value> {
    raw.iter()
        .filter(|(key, _)| !CANONICAL_KEYS.contains(&key.as_str()))
        .filter(|(key, _)| !FLATTENED_PREFIXES.iter().any(|prefix| key.starts_with(prefix)))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

// =============================================================================
// Scalar coercions
// =============================================================================

/// Non-blank strings and numbers become text; everything else is absent.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Integers, truncated floats and numeric strings (with thousands
/// separators) coerce; anything else is absent.
fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            cleaned.parse::<i64>().ok().or_else(|| {
                cleaned
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}

/// Coerce a collection field into an ordered list of strings.
fn sequence(field: &str, value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => strings(items),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else if trimmed.starts_with('[') {
                match serde_json::from_str::<Vec<Value>>(trimmed) {
                    Ok(items) => strings(&items),
                    Err(e) => {
                        warn!(field, error = %e, "Failed to parse JSON-encoded list, using empty list");
                        Vec::new()
                    }
                }
            } else {
                vec![s.clone()]
            }
        }
        _ => Vec::new(),
    }
}

fn strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Dates
// =============================================================================

fn deadline(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(other) => timestamp(other)
            .map(|instant| iso_date(instant.date_naive()))
            .unwrap_or_else(|| DEADLINE_TBD.to_string()),
        None => DEADLINE_TBD.to_string(),
    }
}

fn posted_date(value: Option<&Value>, now: DateTime<Utc>) -> String {
    let instant = match value {
        None | Some(Value::Null) => now,
        Some(Value::String(s)) if s.trim().is_empty() => now,
        Some(other) => timestamp(other).unwrap_or_else(|| {
            warn!(value = %other, "Unparseable postedDate, falling back to now");
            now
        }),
    };
    iso_instant(instant)
}

/// Timestamp objects (`seconds`/`_seconds` with optional nanoseconds),
/// epoch milliseconds, or date strings.
fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_instant(s),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        Value::Object(map) => {
            let seconds = ["seconds", "_seconds"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_i64))?;
            let nanos = ["nanoseconds", "_nanoseconds", "nanos"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_u64))
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            DateTime::from_timestamp(seconds, nanos)
        }
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
