//! SSE transport for Wikimedia EventStreams feeds.
//!
//! An [`EventStream`] wraps one HTTP server-sent-events endpoint and yields
//! a lazy, infinite sequence of data-bearing [`SseFrame`]s. Keep-alives and
//! comment lines never leave the decoder, so consumers only ever see frames
//! that carry a payload.
//!
//! The [`FrameSource`] trait is the seam for tests: scripted sources can
//! stand in for a live feed.

pub mod error;
pub mod source;
pub mod sse;
pub mod stream;

pub use error::{Error, Result};
pub use source::FrameSource;
pub use sse::{SseDecoder, SseFrame};
pub use stream::EventStream;
