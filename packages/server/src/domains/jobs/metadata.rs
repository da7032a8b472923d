//! Page metadata and `JobPosting` structured data for job detail pages.
//!
//! Placeholder values (`N/A`, `TBD`, blank) count as absent here, so a sparse
//! job still yields complete, sensible metadata. Optional structured-data
//! values serialize as explicit `null` instead of being dropped.

use chrono::DateTime;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::dates::{iso_date, parse_calendar_date};
use super::models::{known, CanonicalJob, DEFAULT_TITLE};

const GENERIC_KEYWORDS: [&str; 4] = ["job vacancy", "recruitment", "career", "latest jobs"];
const DEFAULT_EMPLOYMENT_TYPE: &str = "FULL_TIME";
const DEFAULT_LOCALITY: &str = "India";
const DEFAULT_REGION: &str = "IN";

lazy_static! {
    // First currency-prefixed amount, e.g. "Level-2: ₹19,900 – 63,200" -> "19,900"
    static ref PAY_AMOUNT_REGEX: Regex = Regex::new(
        r"(?:₹|Rs\.?|INR)\s*(\d[\d,]*)"
    ).unwrap();
}

/// Site-level inputs to metadata derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataContext {
    /// Base for canonical page URLs, without trailing slash
    pub canonical_base_url: String,
    /// Fallback hiring organization name
    pub site_name: String,
    /// `sameAs` link for the hiring organization
    pub site_url: String,
    pub default_images: DefaultImages,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultImages {
    pub og: String,
    pub twitter: String,
}

impl Default for MetadataContext {
    fn default() -> Self {
        Self {
            canonical_base_url: "https://www.jobvacancy.com".to_string(),
            site_name: "Job Vacancy Hub".to_string(),
            site_url: "https://www.jobvacancy.com/".to_string(),
            default_images: DefaultImages {
                og: "https://www.jobvacancy.com/images/job-finder-og.png".to_string(),
                twitter: "https://www.jobvacancy.com/images/job-finder-twitter.png".to_string(),
            },
        }
    }
}

impl MetadataContext {
    /// Canonical page URL with the id percent-encoded as one path segment.
    pub fn job_url(&self, job_id: &str) -> String {
        format!(
            "{}/jobs/{}",
            self.canonical_base_url.trim_end_matches('/'),
            urlencoding::encode(job_id)
        )
    }
}

/// Head-tag bundle for a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub canonical_url: Option<String>,
    pub open_graph: Option<OpenGraph>,
    pub twitter: Option<TwitterCard>,
    pub structured_data: Option<JobPostingLd>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterCard {
    pub card: &'static str,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

// =============================================================================
// schema.org JobPosting
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingLd {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub title: String,
    pub description: String,
    pub identifier: PropertyValue,
    pub date_posted: String,
    pub valid_through: Option<String>,
    pub employment_type: String,
    pub hiring_organization: HiringOrganization,
    pub job_location: Place,
    pub base_salary: MonetaryAmount,
    pub responsibilities: String,
    pub qualifications: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyValue {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HiringOrganization {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub same_as: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub address: LdPostalAddress,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LdPostalAddress {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub street_address: String,
    pub address_locality: String,
    pub address_region: String,
    pub postal_code: Option<String>,
    pub address_country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonetaryAmount {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub currency: &'static str,
    pub value: QuantitativeValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeValue {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub value: Option<String>,
    pub unit_text: &'static str,
}

impl PageMetadata {
    /// Structured data as a JSON string safe to embed in a
    /// `<script type="application/ld+json">` element.
    pub fn json_ld(&self) -> serde_json::Result<Option<String>> {
        self.structured_data
            .as_ref()
            .map(|ld| serde_json::to_string(ld).map(|json| json.replace("</", "<\\/")))
            .transpose()
    }
}

/// Derive head metadata and structured data for a job detail page.
pub fn derive_metadata(job: &CanonicalJob, context: &MetadataContext) -> PageMetadata {
    let title = known(&job.job_title)
        .or_else(|| known(&job.title))
        .unwrap_or(DEFAULT_TITLE)
        .to_string();

    let description = match job.description.as_deref().and_then(known) {
        Some(description) => description.to_string(),
        None => format!(
            "Detailed information about the {} position at {}.",
            title,
            job.conducted_by().unwrap_or("various organizations")
        ),
    };

    let canonical_url = context.job_url(&job.id);
    let og_image = job
        .og_image
        .clone()
        .unwrap_or_else(|| context.default_images.og.clone());
    let twitter_image = job
        .twitter_image
        .clone()
        .unwrap_or_else(|| context.default_images.twitter.clone());

    let structured_data = job_posting(job, context, &title, &description, &canonical_url);

    PageMetadata {
        keywords: keywords(job, &title),
        canonical_url: Some(canonical_url.clone()),
        open_graph: Some(OpenGraph {
            title: title.clone(),
            description: description.clone(),
            url: canonical_url,
            kind: "article",
            images: vec![og_image],
        }),
        twitter: Some(TwitterCard {
            card: "summary_large_image",
            title: title.clone(),
            description: description.clone(),
            images: vec![twitter_image],
        }),
        structured_data: Some(structured_data),
        title,
        description,
    }
}

/// Metadata for a job id the store does not know.
pub fn not_found_metadata(context: &MetadataContext) -> PageMetadata {
    PageMetadata {
        title: format!("Job Not Found | {}", context.site_name),
        description: "The job you are looking for does not exist.".to_string(),
        keywords: String::new(),
        canonical_url: None,
        open_graph: None,
        twitter: None,
        structured_data: None,
    }
}

fn keywords(job: &CanonicalJob, title: &str) -> String {
    let category = job
        .category
        .as_deref()
        .and_then(known)
        .map(|category| format!("{} jobs", category));

    let candidates = std::iter::once(Some(title.to_string()))
        .chain(std::iter::once(category))
        .chain(std::iter::once(job.conducted_by().map(str::to_string)))
        .chain(GENERIC_KEYWORDS.iter().map(|k| Some(k.to_string())))
        .chain(job.eligibility.iter().map(|item| Some(item.clone())));

    let mut keywords: Vec<String> = Vec::new();
    for keyword in candidates.flatten() {
        let keyword = keyword.trim();
        if keyword.is_empty() || keywords.iter().any(|existing| existing == keyword) {
            continue;
        }
        keywords.push(keyword.to_string());
    }
    keywords.join(", ")
}

fn job_posting(
    job: &CanonicalJob,
    context: &MetadataContext,
    title: &str,
    description: &str,
    canonical_url: &str,
) -> JobPostingLd {
    let organization_name = job
        .conducted_by()
        .unwrap_or(&context.site_name)
        .to_string();
    let address = &job.job_location.address;

    JobPostingLd {
        context: "https://schema.org",
        kind: "JobPosting",
        title: title.to_string(),
        description: description.to_string(),
        identifier: PropertyValue {
            kind: "PropertyValue",
            name: organization_name.clone(),
            value: job.id.clone(),
        },
        date_posted: date_posted(&job.posted_date),
        valid_through: parse_calendar_date(&job.deadline).map(iso_date),
        employment_type: job
            .employment_type
            .as_deref()
            .and_then(known)
            .unwrap_or(DEFAULT_EMPLOYMENT_TYPE)
            .to_string(),
        hiring_organization: HiringOrganization {
            kind: "Organization",
            name: organization_name,
            same_as: context.site_url.clone(),
        },
        job_location: Place {
            kind: "Place",
            address: LdPostalAddress {
                kind: "PostalAddress",
                street_address: address.street_address.clone(),
                address_locality: known(&address.address_locality)
                    .or_else(|| job.location.as_deref().and_then(known))
                    .unwrap_or(DEFAULT_LOCALITY)
                    .to_string(),
                address_region: known(&address.address_region)
                    .unwrap_or(DEFAULT_REGION)
                    .to_string(),
                postal_code: known(&address.postal_code).map(str::to_string),
                address_country: address.address_country.clone(),
            },
        },
        base_salary: MonetaryAmount {
            kind: "MonetaryAmount",
            currency: "INR",
            value: QuantitativeValue {
                kind: "QuantitativeValue",
                value: salary_amount(&job.post_details.pay_scale),
                unit_text: "MONTH",
            },
        },
        responsibilities: job.responsibilities.join(". "),
        qualifications: job.eligibility.join(". "),
        url: canonical_url.to_string(),
    }
}

/// Date-only part of the normalized posted instant.
fn date_posted(posted_date: &str) -> String {
    match DateTime::parse_from_rfc3339(posted_date) {
        Ok(instant) => iso_date(instant.date_naive()),
        Err(_) => posted_date
            .split('T')
            .next()
            .unwrap_or(posted_date)
            .to_string(),
    }
}

/// Numeric monthly amount from a pay-scale string, separators stripped.
pub fn salary_amount(pay_scale: &str) -> Option<String> {
    PAY_AMOUNT_REGEX
        .captures(pay_scale)
        .and_then(|captures| captures.get(1))
        .map(|amount| amount.as_str().replace(',', ""))
        .filter(|amount| !amount.is_empty())
}
