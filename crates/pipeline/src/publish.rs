//! Per-frame publish step: decode, normalize, gate, send.

use crate::traits::EventAdapter;
use anyhow::Result;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use kafka_sink::MessageSink;
use metrics::counter;
use serde_json::Value;
use tracing::{debug, info};

/// Run one raw payload through an adapter and, if it qualifies, send the
/// normalized event to the adapter's topic.
///
/// Returns whether a message was sent. Every rejection path is silent and
/// local; only a sink failure propagates.
pub async fn publish(
    sink: &dyn MessageSink,
    adapter: &dyn EventAdapter,
    payload: &str,
    now: DateTime<Utc>,
) -> Result<bool> {
    let record: Value = match serde_json::from_str(payload) {
        Ok(record) => record,
        Err(e) => {
            debug!(stream = adapter.name(), error = %e, "dropping undecodable frame");
            counter!("producer_events_rejected_total", "stream" => adapter.name(), "reason" => "decode")
                .increment(1);
            return Ok(false);
        }
    };

    let Some(event) = adapter.normalize(&record) else {
        counter!("producer_events_rejected_total", "stream" => adapter.name(), "reason" => "normalize")
            .increment(1);
        return Ok(false);
    };

    if !adapter.is_eligible(&event, &record, now) {
        counter!("producer_events_rejected_total", "stream" => adapter.name(), "reason" => "filter")
            .increment(1);
        return Ok(false);
    }

    let body = serde_json::to_vec(&event)?;
    sink.send(adapter.topic(), Bytes::from(body)).await?;

    counter!("producer_events_published_total", "topic" => adapter.topic()).increment(1);
    info!(
        topic = adapter.topic(),
        title = %event.title,
        domain = %event.domain,
        user_type = ?event.user_type,
        "event published"
    );

    Ok(true)
}
