//! Adapter trait binding one feed to its normalizer, gate, and topic.

use crate::filter::{freshness_at, is_wikipedia_domain};
use crate::schema::NormalizedEvent;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// One upstream feed's view of the pipeline.
///
/// Implementations are stateless; the publisher drives them once per frame.
/// Object-safe so lanes can hold adapters as trait objects.
pub trait EventAdapter: Send + Sync {
    /// Feed name, used for logs and metric labels.
    fn name(&self) -> &'static str;

    /// Output topic for accepted events.
    fn topic(&self) -> &'static str;

    /// Map a decoded record to a normalized event, or reject it.
    fn normalize(&self, record: &Value) -> Option<NormalizedEvent>;

    /// Combined eligibility gate. The default covers the domain and
    /// freshness checks every feed shares; feeds with a subtype gate
    /// override and add to it.
    fn is_eligible(&self, event: &NormalizedEvent, _record: &Value, now: DateTime<Utc>) -> bool {
        is_wikipedia_domain(&event.domain) && freshness_at(&event.timestamp, now).is_some()
    }
}
