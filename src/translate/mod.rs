//! Translation layer for converting inbound chat requests to upstream payloads
//!
//! The upstream accepts a single question per call, so translation picks the
//! most recent user turn, resolves the public model id through the
//! [`ModelRegistry`] and attaches a session id chosen by [`SessionIdPolicy`].

pub mod request;
pub mod session;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;
use crate::registry::ModelRegistry;

pub use request::{ChatRequest, ContentPart, Message, MessageContent, Role};
pub use session::{present_credential, SessionIdPolicy};

/// Errors that can occur during request translation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranslationError {
    /// No message with role `user` and non-empty content
    #[error("No user message found")]
    NoUserMessage,

    /// Public model id not present in the registry
    #[error("Model '{0}' is not supported.")]
    UnsupportedModel(String),

    /// Credential required by the session policy is absent
    #[error("Authorization header is missing")]
    MissingCredential,
}

impl From<TranslationError> for AppError {
    fn from(err: TranslationError) -> Self {
        match err {
            TranslationError::MissingCredential => AppError::MissingCredential,
            other => AppError::InvalidRequest(other.to_string()),
        }
    }
}

/// Payload sent to the upstream chat endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamPayload {
    pub model: String,
    pub question: String,
    pub session_id: String,
    pub language: String,
    pub previous_question: Option<String>,
    pub previous_answer: Option<String>,
    pub img_urls: Vec<String>,
    pub super_smart_mode: bool,
}

/// Converts [`ChatRequest`]s into [`UpstreamPayload`]s
#[derive(Debug, Clone)]
pub struct RequestTranslator {
    registry: Arc<ModelRegistry>,
    language: String,
}

impl RequestTranslator {
    pub fn new(registry: Arc<ModelRegistry>, language: impl Into<String>) -> Self {
        Self {
            registry,
            language: language.into(),
        }
    }

    /// Translate a request. Fails before any upstream call on an invalid request.
    pub fn translate(
        &self,
        request: &ChatRequest,
        policy: &SessionIdPolicy,
    ) -> Result<UpstreamPayload, TranslationError> {
        let question = last_user_text(&request.messages).ok_or(TranslationError::NoUserMessage)?;

        let model = self
            .registry
            .resolve(&request.model)
            .ok_or_else(|| TranslationError::UnsupportedModel(request.model.clone()))?;

        Ok(UpstreamPayload {
            model: model.to_string(),
            question,
            session_id: policy.session_id(),
            language: self.language.clone(),
            previous_question: None,
            previous_answer: None,
            img_urls: Vec::new(),
            super_smart_mode: false,
        })
    }
}

/// Content of the last user message with non-empty content
pub fn last_user_text(messages: &[Message]) -> Option<String> {
    messages
        .iter()
        .rev()
        .filter(|m| m.role == Role::User)
        .find_map(Message::text)
}
