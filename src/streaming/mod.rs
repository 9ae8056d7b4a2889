//! Streaming utilities
//!
//! Buffering, parsing and re-framing for upstream NDJSON streams:
//! - [`decoder`] - incremental UTF-8 decoding
//! - [`LineBuffer`] - line reassembly across chunk boundaries
//! - [`event`] - per-line classification
//! - [`sse`] - outbound chunk types and SSE formatting
//! - [`reframe`] - the NDJSON → SSE transform
//! - [`completion`] - single-response aggregation for non-streaming requests

pub mod completion;
pub mod decoder;
pub mod event;
pub mod reframe;
pub mod sse;

pub use completion::{collect_completion, ChatCompletion};
pub use decoder::Utf8Decoder;
pub use event::StreamEvent;
pub use reframe::{reframe_to_sse, StreamReframer};
pub use sse::{Frame, OutboundChunk, StreamIdentity};

use tracing::warn;

/// Longest upstream line kept in memory while waiting for its newline
pub const MAX_LINE_LEN: usize = 1024 * 1024;

/// Buffer for accumulating incomplete lines across chunk boundaries.
///
/// Upstream data arrives as byte chunks that align with neither line nor
/// character boundaries. Bytes are decoded incrementally, and text is held
/// until a complete line (ending with `\n`) is available.
///
/// # Example
/// ```
/// use chat_adapter::streaming::LineBuffer;
///
/// let mut buffer = LineBuffer::new();
///
/// // First chunk contains partial line
/// let lines1 = buffer.feed(b"{\"type\":\"text-delta\",\"delta\":\"hel");
/// assert!(lines1.is_empty()); // No complete lines yet
///
/// // Second chunk completes the line
/// let lines2 = buffer.feed(b"lo\"}\n");
/// assert_eq!(lines2, vec!["{\"type\":\"text-delta\",\"delta\":\"hello\"}"]);
/// ```
#[derive(Debug, Default)]
pub struct LineBuffer {
    decoder: Utf8Decoder,
    /// Accumulated incomplete line data
    incomplete: String,
    /// Length of `incomplete` already searched for a newline
    scanned: usize,
    /// Set while skipping the rest of an oversized line
    overflowed: bool,
}

impl LineBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed bytes into the buffer and return any complete, non-blank lines.
    ///
    /// The newline is stripped from returned lines. Incomplete trailing data,
    /// including a partial multi-byte character, is retained for the next call.
    /// A line longer than [`MAX_LINE_LEN`] is dropped whole.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        let text = self.decoder.decode(bytes);
        self.incomplete.push_str(&text);

        let mut complete_lines = Vec::new();
        let mut line_start = 0;
        let mut search_from = self.scanned;

        while let Some(offset) = self.incomplete[search_from..].find('\n') {
            let newline_pos = search_from + offset;
            let line = self.incomplete[line_start..newline_pos].trim_end_matches('\r');

            if self.overflowed {
                self.overflowed = false;
            } else if !line.trim().is_empty() {
                complete_lines.push(line.to_string());
            }

            line_start = newline_pos + 1;
            search_from = line_start;
        }

        self.incomplete.drain(..line_start);
        self.scanned = self.incomplete.len();

        if self.incomplete.len() > MAX_LINE_LEN {
            warn!(len = self.incomplete.len(), "Dropping oversized upstream line");
            self.incomplete.clear();
            self.scanned = 0;
            self.overflowed = true;
        }

        complete_lines
    }

    /// Check if there's any incomplete data remaining in the buffer.
    ///
    /// Useful for detecting truncated streams at end of response.
    pub fn has_incomplete(&self) -> bool {
        !self.incomplete.is_empty() || self.overflowed || self.decoder.has_pending()
    }

    /// Get any remaining incomplete (decoded) data.
    pub fn remaining(&self) -> &str {
        &self.incomplete
    }
}
