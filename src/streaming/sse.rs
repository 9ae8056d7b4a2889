//! Outbound chunk types and SSE formatting
//!
//! Every reframed stream is rendered as OpenAI `chat.completion.chunk`
//! events, `data: {json}\n\n`, closed by `data: [DONE]\n\n`.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Terminal marker closing every stream
pub const SSE_DONE: &[u8] = b"data: [DONE]\n\n";

/// Identity shared by every chunk of one stream.
///
/// Fixed when streaming begins and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamIdentity {
    /// Unique identifier for this completion
    pub id: String,
    /// Unix timestamp of creation
    pub created: i64,
    /// Public model id the client asked for
    pub model: String,
}

impl StreamIdentity {
    /// New identity with a fresh id and the current time
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            id: format!("chatcmpl-{}", Uuid::new_v4().simple()),
            created: chrono::Utc::now().timestamp(),
            model: model.into(),
        }
    }

    /// Chunk carrying one text delta
    pub fn chunk(&self, content: impl Into<String>) -> OutboundChunk {
        OutboundChunk {
            id: self.id.clone(),
            object: "chat.completion.chunk".to_string(),
            created: self.created,
            model: self.model.clone(),
            choices: vec![ChunkChoice {
                index: 0,
                delta: ChunkDelta {
                    content: content.into(),
                },
                finish_reason: None,
            }],
        }
    }
}

/// Delta content in a streaming chunk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkDelta {
    pub content: String,
}

/// A choice in a streaming chunk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkChoice {
    pub index: u32,
    pub delta: ChunkDelta,
    /// Always null: completion is signalled only by the terminal marker
    pub finish_reason: Option<String>,
}

/// Streaming chunk (`chat.completion.chunk`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutboundChunk {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChunkChoice>,
}

impl OutboundChunk {
    /// Delta text of the first choice
    pub fn content(&self) -> &str {
        self.choices
            .first()
            .map(|c| c.delta.content.as_str())
            .unwrap_or_default()
    }
}

/// One item of a reframed stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Content delta
    Chunk(OutboundChunk),
    /// Terminal sentinel; always the last item, emitted exactly once
    Done,
}

impl Frame {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Frame::Done)
    }

    /// Render this frame as SSE bytes
    pub fn to_sse(&self) -> Bytes {
        match self {
            Frame::Chunk(chunk) => format_sse_chunk(chunk),
            Frame::Done => format_sse_done(),
        }
    }
}

/// Format a stream chunk as an SSE data event: `data: {json}\n\n`
pub fn format_sse_chunk(chunk: &OutboundChunk) -> Bytes {
    // Plain strings and integers only, serialization cannot fail.
    let json = serde_json::to_string(chunk).unwrap_or_default();
    Bytes::from(format!("data: {}\n\n", json))
}

/// Format the SSE done marker: `data: [DONE]\n\n`
pub fn format_sse_done() -> Bytes {
    Bytes::from_static(SSE_DONE)
}
