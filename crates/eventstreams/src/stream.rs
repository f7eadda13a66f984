//! HTTP stream adapter over a live SSE endpoint.

use crate::error::Result;
use crate::source::FrameSource;
use crate::sse::{SseDecoder, SseFrame};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::collections::VecDeque;
use tracing::{debug, info};

/// Lazy, non-restartable stream of SSE frames from one endpoint.
pub struct EventStream {
    url: String,
    body: BoxStream<'static, reqwest::Result<Bytes>>,
    decoder: SseDecoder,
    pending: VecDeque<SseFrame>,
}

impl EventStream {
    /// Connect to an SSE endpoint and start decoding its body.
    pub async fn open(url: &str) -> Result<Self> {
        let response = reqwest::Client::new()
            .get(url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await?
            .error_for_status()?;

        info!(%url, "connected to event stream");

        Ok(Self {
            url: url.to_string(),
            body: response.bytes_stream().boxed(),
            decoder: SseDecoder::new(),
            pending: VecDeque::new(),
        })
    }
}

#[async_trait]
impl FrameSource for EventStream {
    async fn next_frame(&mut self) -> Result<Option<SseFrame>> {
        loop {
            if let Some(frame) = self.pending.pop_front() {
                return Ok(Some(frame));
            }

            match self.body.next().await {
                Some(Ok(chunk)) => self.pending.extend(self.decoder.push(&chunk)),
                Some(Err(e)) => return Err(e.into()),
                None => {
                    debug!(url = %self.url, "event stream closed by upstream");
                    return Ok(None);
                }
            }
        }
    }
}
