//! Per-schema normalizers.
//!
//! Both functions map a decoded record to a [`NormalizedEvent`] or reject it
//! with `None`. A missing key, a wrong type, or malformed nesting is never
//! an error to the caller.

use crate::schema::{NormalizedEvent, UserType};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawMeta {
    domain: String,
    dt: String,
}

/// Fields required from the recentchange feed.
#[derive(Debug, Deserialize)]
struct RawRecentChange {
    title: String,
    user: String,
    bot: bool,
    meta: RawMeta,
}

#[derive(Debug, Deserialize)]
struct RawPerformer {
    user_text: String,
    user_is_bot: bool,
    user_edit_count: u64,
}

/// Fields shared by the page-create and revision-create feeds.
#[derive(Debug, Deserialize)]
struct RawCreation {
    page_title: String,
    meta: RawMeta,
    performer: RawPerformer,
}

/// Normalize one recentchange record.
pub fn normalize_recent_change(record: &Value) -> Option<NormalizedEvent> {
    let raw = RawRecentChange::deserialize(record).ok()?;

    Some(NormalizedEvent {
        title: raw.title,
        domain: raw.meta.domain,
        timestamp: raw.meta.dt,
        user_name: raw.user,
        user_type: UserType::from_bot_flag(raw.bot),
        edit_count: None,
    })
}

/// Normalize one page-create or revision-create record.
pub fn normalize_creation(record: &Value) -> Option<NormalizedEvent> {
    let raw = RawCreation::deserialize(record).ok()?;

    Some(NormalizedEvent {
        title: raw.page_title,
        domain: raw.meta.domain,
        timestamp: raw.meta.dt,
        user_name: raw.performer.user_text,
        user_type: UserType::from_bot_flag(raw.performer.user_is_bot),
        edit_count: Some(raw.performer.user_edit_count),
    })
}
