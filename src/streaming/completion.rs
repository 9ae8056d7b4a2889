//! Non-streaming responses
//!
//! When a client disables streaming, the reframed deltas are concatenated
//! into a single `chat.completion` object.

use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use super::sse::{Frame, StreamIdentity};

/// Message in a completion choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionMessage {
    pub role: String,
    pub content: String,
}

/// A completion choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: CompletionMessage,
    pub finish_reason: Option<String>,
}

/// Chat completion response (non-streaming)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatCompletion {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<CompletionChoice>,
}

impl ChatCompletion {
    pub fn new(identity: &StreamIdentity, content: String) -> Self {
        Self {
            id: identity.id.clone(),
            object: "chat.completion".to_string(),
            created: identity.created,
            model: identity.model.clone(),
            choices: vec![CompletionChoice {
                index: 0,
                message: CompletionMessage {
                    role: "assistant".to_string(),
                    content,
                },
                finish_reason: Some("stop".to_string()),
            }],
        }
    }
}

/// Drain a reframed stream into one completion.
pub async fn collect_completion<S>(identity: &StreamIdentity, frames: S) -> ChatCompletion
where
    S: Stream<Item = Frame>,
{
    futures::pin_mut!(frames);

    let mut content = String::new();
    while let Some(frame) = frames.next().await {
        match frame {
            Frame::Chunk(chunk) => content.push_str(chunk.content()),
            Frame::Done => break,
        }
    }

    ChatCompletion::new(identity, content)
}
