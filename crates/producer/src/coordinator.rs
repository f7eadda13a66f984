//! Lock-step fan-in over the three event streams.
//!
//! Each tick draws one frame from every stream before processing any of
//! them, so the slowest feed gates overall throughput. That coupling is the
//! intended pacing model, not an accident; do not replace the join with
//! per-lane buffering without revisiting the accepted-count semantics.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use eventstreams::{FrameSource, SseFrame};
use kafka_sink::MessageSink;
use metrics::gauge;
use pipeline::{publish, EventAdapter};
use tracing::info;

/// Accepted-event accounting for one run. Owned by the [`Coordinator`]
/// exclusively; publishers never see it.
pub struct PipelineState {
    accepted: u64,
    threshold: u64,
}

impl PipelineState {
    pub fn new(threshold: u64) -> Self {
        Self {
            accepted: 0,
            threshold,
        }
    }

    fn record_accepted(&mut self) {
        self.accepted += 1;
        gauge!("producer_accepted_events").set(self.accepted as f64);
    }

    fn threshold_reached(&self) -> bool {
        self.accepted >= self.threshold
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }
}

/// One stream bound to its adapter and output sink.
pub struct Lane {
    source: Box<dyn FrameSource>,
    adapter: Box<dyn EventAdapter>,
    sink: Box<dyn MessageSink>,
}

impl Lane {
    pub fn new(
        source: Box<dyn FrameSource>,
        adapter: Box<dyn EventAdapter>,
        sink: Box<dyn MessageSink>,
    ) -> Self {
        Self {
            source,
            adapter,
            sink,
        }
    }
}

/// Drives the three lanes until the accepted-event threshold is reached,
/// then closes every sink and stops.
pub struct Coordinator {
    edits: Lane,
    creations: Lane,
    revisions: Lane,
    state: PipelineState,
}

impl Coordinator {
    pub fn new(edits: Lane, creations: Lane, revisions: Lane, events_to_produce: u64) -> Self {
        Self {
            edits,
            creations,
            revisions,
            state: PipelineState::new(events_to_produce),
        }
    }

    /// Run to completion. Returns the number of accepted events, which can
    /// exceed the threshold by up to two since the check runs once per tick.
    pub async fn run(mut self) -> Result<u64> {
        info!(
            threshold = self.state.threshold,
            "publishing events to the message bus"
        );

        loop {
            let (edit, creation, revision) = tokio::join!(
                self.edits.source.next_frame(),
                self.creations.source.next_frame(),
                self.revisions.source.next_frame(),
            );

            let now = Utc::now();
            Self::process_frame(&mut self.state, &self.edits, edit?, now).await?;
            Self::process_frame(&mut self.state, &self.creations, creation?, now).await?;
            Self::process_frame(&mut self.state, &self.revisions, revision?, now).await?;

            if self.state.threshold_reached() {
                break;
            }
        }

        self.edits.sink.close().await?;
        self.creations.sink.close().await?;
        self.revisions.sink.close().await?;

        info!(
            accepted = self.state.accepted(),
            "event threshold reached, sinks closed"
        );
        Ok(self.state.accepted())
    }

    async fn process_frame(
        state: &mut PipelineState,
        lane: &Lane,
        frame: Option<SseFrame>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let Some(frame) = frame else {
            bail!("{} stream ended unexpectedly", lane.adapter.name());
        };

        if !frame.is_message() {
            return Ok(());
        }

        if publish(lane.sink.as_ref(), lane.adapter.as_ref(), &frame.data, now).await? {
            state.record_accepted();
        }
        Ok(())
    }
}
