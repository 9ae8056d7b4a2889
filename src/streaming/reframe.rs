//! NDJSON → SSE re-framing
//!
//! Turns the upstream's newline-delimited event stream into OpenAI-style
//! streaming chunks. The transform is single pass and pull driven: upstream
//! bytes are read only when the consumer asks for the next frame, and
//! dropping the output stream drops the upstream stream with it.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tracing::{debug, warn};

use super::event::StreamEvent;
use super::sse::{Frame, OutboundChunk, StreamIdentity};
use super::LineBuffer;

/// Longest line excerpt written to logs
const LOG_EXCERPT_LEN: usize = 500;

/// Per-stream re-framing state.
///
/// Owns the residual line buffer and the stream identity for exactly one
/// response; never shared between requests.
#[derive(Debug)]
pub struct StreamReframer {
    identity: StreamIdentity,
    lines: LineBuffer,
    emitted: usize,
    discarded: usize,
}

impl StreamReframer {
    /// Start a stream for the given public model; id and timestamp are fixed now
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_identity(StreamIdentity::new(model))
    }

    pub fn with_identity(identity: StreamIdentity) -> Self {
        Self {
            identity,
            lines: LineBuffer::new(),
            emitted: 0,
            discarded: 0,
        }
    }

    pub fn identity(&self) -> &StreamIdentity {
        &self.identity
    }

    /// Feed one upstream chunk and return the chunks it completes, in order.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<OutboundChunk> {
        let mut chunks = Vec::new();

        for line in self.lines.feed(bytes) {
            match StreamEvent::parse(&line) {
                Ok(StreamEvent::TextDelta(text)) => {
                    chunks.push(self.identity.chunk(text));
                }
                Ok(StreamEvent::Other) => {}
                Err(e) => {
                    self.discarded += 1;
                    warn!(
                        error = %e,
                        line = %excerpt(&line),
                        line_len = line.len(),
                        model = %self.identity.model,
                        "Discarding malformed upstream line"
                    );
                }
            }
        }

        self.emitted += chunks.len();
        chunks
    }

    /// End of input. Any unterminated fragment is dropped unparsed.
    pub fn finish(self) -> Frame {
        if self.lines.has_incomplete() {
            debug!(
                fragment = %excerpt(self.lines.remaining()),
                model = %self.identity.model,
                "Dropping unterminated trailing fragment"
            );
        }

        debug!(
            id = %self.identity.id,
            chunks = self.emitted,
            discarded_lines = self.discarded,
            "Upstream stream finished"
        );

        Frame::Done
    }

    /// Re-frame an upstream byte stream.
    ///
    /// Yields one [`Frame::Chunk`] per text delta in source order, then exactly
    /// one [`Frame::Done`]. An upstream transport error ends the input: it is
    /// logged, no further reads happen and the sentinel is still emitted.
    pub fn into_stream<S, E>(mut self, upstream: S) -> impl Stream<Item = Frame> + Send + 'static
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        async_stream::stream! {
            futures::pin_mut!(upstream);

            while let Some(item) = upstream.next().await {
                match item {
                    Ok(bytes) => {
                        for chunk in self.push(&bytes) {
                            yield Frame::Chunk(chunk);
                        }
                    }
                    Err(e) => {
                        warn!(
                            error = %e,
                            model = %self.identity.model,
                            "Upstream stream error, closing response"
                        );
                        break;
                    }
                }
            }

            yield self.finish();
        }
    }
}

/// Re-frame an upstream byte stream for `model` into SSE bytes
pub fn reframe_to_sse<S, E>(
    upstream: S,
    model: impl Into<String>,
) -> impl Stream<Item = Result<Bytes, std::convert::Infallible>> + Send + 'static
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    StreamReframer::new(model)
        .into_stream(upstream)
        .map(|frame| Ok(frame.to_sse()))
}

/// Truncate at a char boundary for logging
fn excerpt(line: &str) -> &str {
    match line.char_indices().nth(LOG_EXCERPT_LEN) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
