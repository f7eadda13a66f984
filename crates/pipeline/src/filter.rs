//! Eligibility predicates: domain gate and freshness gate.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Upstream timestamp format.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Upper bound of the month bucket, in hours.
const MONTH_HOURS: f64 = 730.484_398;

/// Age bucket of an event timestamp. Anything older than a month (or
/// unparsable) has no bucket and is filtered out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Hour,
    Day,
    Week,
    Month,
}

/// True when the second dot-delimited label of the domain is "wikipedia".
///
/// "en.wikipedia.org" passes; "commons.wikimedia.org", the empty string,
/// and single-label domains do not.
pub fn is_wikipedia_domain(domain: &str) -> bool {
    domain.split('.').nth(1) == Some("wikipedia")
}

/// Bucket `timestamp` by its age relative to `now`.
///
/// Timestamps in the future land in the hour bucket, so minor upstream
/// clock skew does not drop events.
pub fn freshness_at(timestamp: &str, now: DateTime<Utc>) -> Option<Freshness> {
    let past = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?;
    let hours = (now.naive_utc() - past).num_seconds() as f64 / 3600.0;

    if hours <= 1.0 {
        Some(Freshness::Hour)
    } else if hours <= 24.0 {
        Some(Freshness::Day)
    } else if hours <= 168.0 {
        Some(Freshness::Week)
    } else if hours <= MONTH_HOURS {
        Some(Freshness::Month)
    } else {
        None
    }
}

/// [`freshness_at`] against the current wall clock.
pub fn freshness(timestamp: &str) -> Option<Freshness> {
    freshness_at(timestamp, Utc::now())
}
