//! Frame source trait for stream consumers.

use crate::error::Result;
use crate::sse::SseFrame;
use async_trait::async_trait;

/// One upstream feed of SSE frames.
///
/// Implemented by [`crate::EventStream`] for live HTTP feeds; tests supply
/// scripted sources. `Ok(None)` means the upstream closed the stream, which
/// callers should treat as fatal since the feeds are nominally infinite.
#[async_trait]
pub trait FrameSource: Send {
    /// Wait for the next data-bearing frame.
    async fn next_frame(&mut self) -> Result<Option<SseFrame>>;
}
