//! Deadline expiry checks for listings.
//!
//! Unknown deadlines are never expired: placeholders and unparseable strings
//! keep the job visible. Nothing here mutates or deletes stored records.

use chrono::{NaiveDate, Utc};
use tracing::warn;

use super::dates::parse_calendar_date;
use super::models::known;

/// True when the deadline's calendar date is strictly before `as_of`.
pub fn is_expired(deadline: &str, as_of: NaiveDate) -> bool {
    let Some(deadline) = known(deadline) else {
        return false;
    };

    match parse_calendar_date(deadline) {
        Some(date) => date < as_of,
        None => {
            warn!(deadline, "Unparseable deadline, treating job as not expired");
            false
        }
    }
}

/// [`is_expired`] against today's UTC date.
pub fn is_expired_today(deadline: &str) -> bool {
    is_expired(deadline, Utc::now().date_naive())
}
