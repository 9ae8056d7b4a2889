//! Mock upstream chat service for testing
//!
//! Provides a wiremock-based stand-in for the upstream chat endpoint, which
//! takes a JSON payload and answers with newline-delimited JSON events.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::mocks::upstream::{MockUpstream, NdjsonTestData};
//!
//! #[tokio::test]
//! async fn test_with_upstream_mock() {
//!     let upstream = MockUpstream::start().await;
//!     upstream.mock_ndjson(NdjsonTestData::deltas(&["He", "llo"])).await;
//!
//!     // Use upstream.chat_url() as UPSTREAM_URL
//!     // ...
//! }
//! ```

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Path of the upstream chat endpoint
pub const CHAT_PATH: &str = "/api/ha/v1/chat";

/// Mock upstream server wrapper
pub struct MockUpstream {
    server: MockServer,
}

impl MockUpstream {
    /// Start a new mock upstream server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the mock server URI
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Full URL of the chat endpoint
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.server.uri(), CHAT_PATH)
    }

    /// Answer chat requests with the given NDJSON body
    pub async fn mock_ndjson(&self, body: impl Into<String>) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(body.into())
                    .insert_header("Content-Type", "application/x-ndjson"),
            )
            .mount(&self.server)
            .await;
    }

    /// Answer chat requests with an error status and body
    pub async fn mock_error(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Answer chat requests with a success status and no body
    pub async fn mock_empty(&self) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    /// Get all received requests
    pub async fn received_requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// JSON bodies of all received chat requests
    pub async fn received_payloads(&self) -> Vec<Value> {
        self.received_requests()
            .await
            .iter()
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }
}

/// Canned upstream event streams
pub struct NdjsonTestData;

impl NdjsonTestData {
    /// One text-delta event
    pub fn delta(text: &str) -> String {
        json!({"type": "text-delta", "delta": text}).to_string()
    }

    /// Text-delta events, one per line
    pub fn deltas(texts: &[&str]) -> String {
        texts
            .iter()
            .map(|t| format!("{}\n", Self::delta(t)))
            .collect()
    }

    /// A realistic stream mixing control events around the deltas
    pub fn with_control_events(texts: &[&str]) -> String {
        let mut body = String::new();
        body.push_str(&json!({"type": "start", "messageId": "m-1"}).to_string());
        body.push('\n');
        body.push_str(&Self::deltas(texts));
        body.push_str(&json!({"type": "finish", "finishReason": "stop"}).to_string());
        body.push('\n');
        body
    }
}
