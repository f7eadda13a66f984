//! Adapters for the three Wikimedia EventStreams feeds.

use crate::normalize::{normalize_creation, normalize_recent_change};
use crate::schema::NormalizedEvent;
use crate::traits::EventAdapter;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// SSE endpoint for the recentchange feed.
pub const RECENT_CHANGE_STREAM_URL: &str = "https://stream.wikimedia.org/v2/stream/recentchange";
/// SSE endpoint for the page-create feed.
pub const PAGE_CREATE_STREAM_URL: &str = "https://stream.wikimedia.org/v2/stream/page-create";
/// SSE endpoint for the revision-create feed.
pub const REVISION_CREATE_STREAM_URL: &str =
    "https://stream.wikimedia.org/v2/stream/revision-create";

/// recentchange → `page-edit`. Only records with `type == "edit"` qualify;
/// the feed also carries log, categorize, and new-page entries.
#[derive(Debug, Default, Clone)]
pub struct RecentChangeAdapter;

impl EventAdapter for RecentChangeAdapter {
    fn name(&self) -> &'static str {
        "recentchange"
    }

    fn topic(&self) -> &'static str {
        "page-edit"
    }

    fn normalize(&self, record: &Value) -> Option<NormalizedEvent> {
        normalize_recent_change(record)
    }

    fn is_eligible(&self, event: &NormalizedEvent, record: &Value, now: DateTime<Utc>) -> bool {
        record.get("type").and_then(Value::as_str) == Some("edit")
            && crate::filter::is_wikipedia_domain(&event.domain)
            && crate::filter::freshness_at(&event.timestamp, now).is_some()
    }
}

/// page-create → `page-create`.
#[derive(Debug, Default, Clone)]
pub struct PageCreateAdapter;

impl EventAdapter for PageCreateAdapter {
    fn name(&self) -> &'static str {
        "page-create"
    }

    fn topic(&self) -> &'static str {
        "page-create"
    }

    fn normalize(&self, record: &Value) -> Option<NormalizedEvent> {
        normalize_creation(record)
    }
}

/// revision-create → `revision-create`. Same schema as page-create.
#[derive(Debug, Default, Clone)]
pub struct RevisionCreateAdapter;

impl EventAdapter for RevisionCreateAdapter {
    fn name(&self) -> &'static str {
        "revision-create"
    }

    fn topic(&self) -> &'static str {
        "revision-create"
    }

    fn normalize(&self, record: &Value) -> Option<NormalizedEvent> {
        normalize_creation(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn edit_record(kind: &str, domain: &str, dt: &str) -> Value {
        json!({
            "title": "Some page",
            "user": "Alice",
            "bot": false,
            "type": kind,
            "meta": {"domain": domain, "dt": dt}
        })
    }

    #[test]
    fn test_recent_change_requires_edit_subtype() {
        let adapter = RecentChangeAdapter;
        let now = fixed_now();

        let record = edit_record("edit", "en.wikipedia.org", "2024-01-15T12:00:00Z");
        let event = adapter.normalize(&record).unwrap();
        assert!(adapter.is_eligible(&event, &record, now));

        let record = edit_record("log", "en.wikipedia.org", "2024-01-15T12:00:00Z");
        let event = adapter.normalize(&record).unwrap();
        assert!(!adapter.is_eligible(&event, &record, now));

        // Missing subtype field rejects too.
        let mut record = edit_record("edit", "en.wikipedia.org", "2024-01-15T12:00:00Z");
        record.as_object_mut().unwrap().remove("type");
        let event = adapter.normalize(&record).unwrap();
        assert!(!adapter.is_eligible(&event, &record, now));
    }

    #[test]
    fn test_recent_change_rejects_non_wikipedia_domain() {
        let adapter = RecentChangeAdapter;
        let now = fixed_now();

        let record = edit_record("edit", "commons.wikimedia.org", "2024-01-15T12:00:00Z");
        let event = adapter.normalize(&record).unwrap();
        assert!(!adapter.is_eligible(&event, &record, now));
    }

    #[test]
    fn test_creation_adapters_have_no_subtype_gate() {
        let record = json!({
            "page_title": "New_page",
            "meta": {"domain": "en.wikipedia.org", "dt": "2024-01-15T11:30:00Z"},
            "performer": {"user_text": "Bob", "user_is_bot": true, "user_edit_count": 7}
        });
        let now = fixed_now();

        for adapter in [&PageCreateAdapter as &dyn EventAdapter, &RevisionCreateAdapter] {
            let event = adapter.normalize(&record).unwrap();
            assert!(adapter.is_eligible(&event, &record, now));
        }
        assert_eq!(PageCreateAdapter.topic(), "page-create");
        assert_eq!(RevisionCreateAdapter.topic(), "revision-create");
    }

    #[test]
    fn test_stale_event_is_rejected() {
        let adapter = PageCreateAdapter;
        let record = json!({
            "page_title": "Old_page",
            "meta": {"domain": "en.wikipedia.org", "dt": "2023-01-01T00:00:00Z"},
            "performer": {"user_text": "Bob", "user_is_bot": false, "user_edit_count": 7}
        });
        let event = adapter.normalize(&record).unwrap();
        assert!(!adapter.is_eligible(&event, &record, fixed_now()));
    }

    #[test]
    fn test_decision_is_deterministic_for_fixed_clock() {
        // Replaying the same raw record yields the same decision.
        let adapter = RecentChangeAdapter;
        let now = fixed_now();
        let record = edit_record("edit", "en.wikipedia.org", "2024-01-15T11:00:00Z");

        let first = adapter
            .normalize(&record)
            .map(|e| adapter.is_eligible(&e, &record, now));
        for _ in 0..3 {
            let again = adapter
                .normalize(&record)
                .map(|e| adapter.is_eligible(&e, &record, now));
            assert_eq!(first, again);
        }
    }
}
