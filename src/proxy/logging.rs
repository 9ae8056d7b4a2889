//! Request logging utilities for upstream proxying
//!
//! Provides structured logging with correlation IDs for tracing one chat
//! request from arrival through the upstream call to the end of its stream.

use std::time::Instant;
use tracing::{error, info, Span};
use uuid::Uuid;

/// Context for tracking a request through the system
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request (for log correlation)
    pub trace_id: String,
    /// When the request started
    pub start_time: Instant,
    /// Upstream handling this request
    pub upstream: String,
    /// Public model requested by the client
    pub model: String,
    /// Whether this is a streaming request
    pub streaming: bool,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(upstream: &str, model: impl Into<String>) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(), // Short ID for readability
            start_time: Instant::now(),
            upstream: upstream.to_string(),
            model: model.into(),
            streaming: true,
        }
    }

    /// Mark whether the client asked for a stream
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    /// Log request initiation
    pub fn log_request_start(&self, upstream_model: &str, messages: usize) {
        info!(
            trace_id = %self.trace_id,
            upstream = %self.upstream,
            model = %self.model,
            upstream_model = %upstream_model,
            streaming = %self.streaming,
            messages = messages,
            "Processing chat completion request"
        );
    }

    /// Log response received from upstream
    pub fn log_upstream_response(&self, status: u16) {
        info!(
            trace_id = %self.trace_id,
            upstream = %self.upstream,
            status = %status,
            elapsed_ms = %self.elapsed_ms(),
            "Response received from upstream"
        );
    }

    /// Log request completion (non-streaming)
    pub fn log_request_complete(&self, content_len: usize) {
        info!(
            trace_id = %self.trace_id,
            model = %self.model,
            content_len = content_len,
            elapsed_ms = %self.elapsed_ms(),
            "Chat completion request completed"
        );
    }

    /// Log stream started (for streaming requests)
    pub fn log_stream_started(&self) {
        info!(
            trace_id = %self.trace_id,
            upstream = %self.upstream,
            model = %self.model,
            elapsed_ms = %self.elapsed_ms(),
            "Streaming response started"
        );
    }

    /// Log request failure
    pub fn log_error(&self, error: &str) {
        error!(
            trace_id = %self.trace_id,
            upstream = %self.upstream,
            model = %self.model,
            streaming = %self.streaming,
            elapsed_ms = %self.elapsed_ms(),
            error = %error,
            "Request failed"
        );
    }

    /// Create a tracing span for this request
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "chat_request",
            trace_id = %self.trace_id,
            upstream = %self.upstream,
            model = %self.model,
            streaming = %self.streaming,
        )
    }
}
