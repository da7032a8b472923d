use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::sector::Sector;

/// Placeholder for any text field the source record did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Deadline placeholder meaning "not announced yet".
pub const DEADLINE_TBD: &str = "TBD";

pub const DEFAULT_TITLE: &str = "Job Details";

pub const DEFAULT_COUNTRY: &str = "IN";

/// Fully-defaulted, fixed-shape projection of a job document.
///
/// Produced by [`crate::domains::jobs::normalize`] on every read and never
/// written back to the store. Serializes with the camelCase field names that
/// the page and metadata layers rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalJob {
    pub id: String,
    pub title: String,
    pub job_title: String,
    pub description: Option<String>,

    // Classification (opaque strings; see `sector_kind`)
    pub category: Option<String>,
    pub sector: Option<String>,
    pub subcategory: Option<String>,

    pub organization: Organization,
    pub post_details: PostDetails,
    pub application_fee: ApplicationFee,
    pub job_location: JobLocation,

    pub eligibility: Vec<String>,
    pub selection_process: Vec<String>,
    pub exam_centers: Vec<String>,
    pub important_instructions: Vec<String>,
    pub how_to_apply: Vec<String>,
    pub responsibilities: Vec<String>,

    /// `YYYY-MM-DD`, a passthrough string, or `TBD`
    pub deadline: String,
    /// RFC 3339 instant in UTC
    pub posted_date: String,
    pub apply_link: String,

    pub employment_type: Option<String>,
    pub og_image: Option<String>,
    pub twitter_image: Option<String>,
    pub location: Option<String>,

    /// Display-only fields carried through from the source document
    /// (e.g. `importantDates`, `tableEligibilitySummary`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub conducted_by: String,
    pub location: String,
    pub advertisement_no: String,
    pub application_mode: String,
    pub last_date_to_apply: String,
}

impl Default for Organization {
    fn default() -> Self {
        Self {
            conducted_by: NOT_AVAILABLE.to_string(),
            location: NOT_AVAILABLE.to_string(),
            advertisement_no: NOT_AVAILABLE.to_string(),
            application_mode: NOT_AVAILABLE.to_string(),
            last_date_to_apply: NOT_AVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetails {
    pub post_name: String,
    pub total_vacancies: i64,
    pub ur: i64,
    pub obc: i64,
    pub sc: i64,
    pub st: i64,
    pub ewc: i64,
    pub group: String,
    pub pay_scale: String,
    pub additional_benefits: String,
}

impl Default for PostDetails {
    fn default() -> Self {
        Self {
            post_name: NOT_AVAILABLE.to_string(),
            total_vacancies: 0,
            ur: 0,
            obc: 0,
            sc: 0,
            st: 0,
            ewc: 0,
            group: NOT_AVAILABLE.to_string(),
            pay_scale: NOT_AVAILABLE.to_string(),
            additional_benefits: NOT_AVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationFee {
    pub fee: String,
    pub exempted_categories: String,
    pub payment_mode: String,
}

impl Default for ApplicationFee {
    fn default() -> Self {
        Self {
            fee: NOT_AVAILABLE.to_string(),
            exempted_categories: NOT_AVAILABLE.to_string(),
            payment_mode: NOT_AVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobLocation {
    pub address: PostalAddress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    pub street_address: String,
    pub address_locality: String,
    pub address_region: String,
    pub postal_code: String,
    pub address_country: String,
}

impl Default for PostalAddress {
    fn default() -> Self {
        Self {
            street_address: NOT_AVAILABLE.to_string(),
            address_locality: NOT_AVAILABLE.to_string(),
            address_region: NOT_AVAILABLE.to_string(),
            postal_code: NOT_AVAILABLE.to_string(),
            address_country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl CanonicalJob {
    /// Resolve the closed sector vocabulary from `sector`, then `category`,
    /// then `subcategory`.
    pub fn sector_kind(&self) -> Option<Sector> {
        [&self.sector, &self.category, &self.subcategory]
            .into_iter()
            .flatten()
            .find_map(|value| Sector::parse(value))
    }

    /// Hiring organization name, or None while it is still a placeholder.
    pub fn conducted_by(&self) -> Option<&str> {
        known(&self.organization.conducted_by)
    }

    /// Read a carried-through display field as text.
    pub fn extra_text(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str).and_then(known)
    }
}

/// Returns the value unless it is blank or one of the placeholders.
pub fn known(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case(NOT_AVAILABLE)
        || trimmed.eq_ignore_ascii_case(DEADLINE_TBD)
    {
        None
    } else {
        Some(value)
    }
}
