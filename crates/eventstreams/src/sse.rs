//! Incremental server-sent-events decoder.

use std::mem;

/// One decoded SSE frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SseFrame {
    /// Event type; `"message"` when the server omits the `event:` field.
    pub event: String,
    /// Payload, multiple `data:` lines joined with `\n`.
    pub data: String,
}

impl SseFrame {
    /// Whether this frame is a regular data message (as opposed to a
    /// server-defined control event).
    pub fn is_message(&self) -> bool {
        self.event == "message"
    }
}

/// Incremental decoder for a `text/event-stream` body.
///
/// Feed raw chunks as they arrive; the decoder buffers partial lines across
/// chunk boundaries. Comment lines (`:`) and frames without any `data:`
/// line (keep-alives) are swallowed and never produce a frame.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: Vec<u8>,
    event: String,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one chunk of the response body, returning every frame that
    /// completed within it.
    ///
    /// Chunk boundaries are arbitrary, so the buffer holds raw bytes and
    /// text conversion happens per complete line; a multi-byte codepoint
    /// never contains `\n`, so it cannot be split by the line break.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buf.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            self.feed_line(line.trim_end_matches(['\r', '\n']), &mut frames);
        }
        frames
    }

    fn feed_line(&mut self, line: &str, out: &mut Vec<SseFrame>) {
        // Blank line terminates the current frame.
        if line.is_empty() {
            if !self.data.is_empty() {
                let event = if self.event.is_empty() {
                    "message".to_string()
                } else {
                    mem::take(&mut self.event)
                };
                out.push(SseFrame {
                    event,
                    data: self.data.join("\n"),
                });
            }
            self.event.clear();
            self.data.clear();
            return;
        }

        // Comment / keep-alive line.
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event = value.to_string(),
            "data" => self.data.push(value.to_string()),
            // `id` and `retry` are irrelevant here: no resume support.
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_frame() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"event: message\ndata: {\"title\":\"x\"}\n\n");

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event, "message");
        assert_eq!(frames[0].data, "{\"title\":\"x\"}");
        assert!(frames[0].is_message());
    }

    #[test]
    fn test_default_event_type_is_message() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"data: hello\n\n");

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event, "message");
    }

    #[test]
    fn test_frame_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"event: mess").is_empty());
        assert!(decoder.push(b"age\ndata: par").is_empty());
        let frames = decoder.push(b"tial\n\n");

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "partial");
    }

    #[test]
    fn test_multibyte_codepoint_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        // "café" with the chunk boundary inside the two-byte é.
        assert!(decoder.push(b"data: caf\xc3").is_empty());
        let frames = decoder.push(b"\xa9\n\n");

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "café");
    }

    #[test]
    fn test_comments_and_keepalives_are_swallowed() {
        let mut decoder = SseDecoder::new();
        // Comment line, then an event with no data (keep-alive), then a
        // real frame.
        let frames = decoder.push(b":ok\n\nevent: message\n\ndata: real\n\n");

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "real");
    }

    #[test]
    fn test_multiline_data_joined() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"data: a\ndata: b\n\n");

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "a\nb");
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"event: message\r\ndata: x\r\n\r\n");

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "x");
    }

    #[test]
    fn test_multiple_frames_in_one_chunk() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"data: one\n\ndata: two\n\n");

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].data, "one");
        assert_eq!(frames[1].data, "two");
    }

    #[test]
    fn test_non_message_event_type() {
        let mut decoder = SseDecoder::new();
        let frames = decoder.push(b"event: error\ndata: oops\n\n");

        assert_eq!(frames.len(), 1);
        assert!(!frames[0].is_message());
    }
}
