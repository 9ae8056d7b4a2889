//! Common test utilities for the chat adapter
//!
//! Shared fixtures and helpers used across the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue};
use axum_test::TestServer;
use serde_json::json;

use chat_adapter::{config::SessionIdMode, routes, AppState, Config};

use crate::mocks::MockUpstream;

/// Test configuration constants
pub mod constants {
    /// Bearer credential sent by test callers
    pub const TEST_CREDENTIAL: &str = "Bearer test-key";
    /// Public model id used throughout the tests
    pub const TEST_MODEL: &str = "gpt-4o-mini";
    /// Upstream model id `TEST_MODEL` maps to
    pub const TEST_UPSTREAM_MODEL: &str = "openai/gpt-4o-mini";
}

/// Model table used by the test harness
pub fn test_model_map() -> Vec<(String, String)> {
    vec![
        (
            constants::TEST_MODEL.to_string(),
            constants::TEST_UPSTREAM_MODEL.to_string(),
        ),
        (
            "deepseek-chat".to_string(),
            "deepseek/deepseek-chat".to_string(),
        ),
    ]
}

/// Test request bodies
pub mod requests {
    use super::*;

    /// Streaming request with a single user message
    pub fn chat_request(model: &str, content: &str) -> serde_json::Value {
        json!({
            "model": model,
            "messages": [{"role": "user", "content": content}]
        })
    }

    /// Non-streaming request with a single user message
    pub fn non_streaming_request(model: &str, content: &str) -> serde_json::Value {
        json!({
            "model": model,
            "stream": false,
            "messages": [{"role": "user", "content": content}]
        })
    }
}

/// Authorization header pair for `credential`
pub fn auth_header(credential: &str) -> (HeaderName, HeaderValue) {
    (
        header::AUTHORIZATION,
        HeaderValue::from_str(credential).expect("valid header value"),
    )
}

/// Router wired to a mock upstream, served in-process
pub struct TestHarness {
    pub server: TestServer,
    pub upstream: MockUpstream,
}

impl TestHarness {
    /// Create a harness with the default test configuration
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a harness, adjusting the configuration first
    pub async fn with_config(adjust: impl FnOnce(&mut Config)) -> Self {
        let upstream = MockUpstream::start().await;

        let mut config = Config::for_upstream(upstream.chat_url(), test_model_map());
        adjust(&mut config);

        let state = Arc::new(AppState::new(config).expect("Failed to build app state"));
        let app = routes::create_router(state);
        let server = TestServer::new(app).expect("Failed to create test server");

        Self { server, upstream }
    }

    /// Create a harness that uses the caller's token as the session id
    pub async fn token_sessions() -> Self {
        Self::with_config(|config| config.session_id_mode = SessionIdMode::Token).await
    }
}

/// `data:` payloads of an SSE body, in order
pub fn sse_data(body: &str) -> Vec<String> {
    body.split("\n\n")
        .filter_map(|event| event.strip_prefix("data: "))
        .map(str::to_string)
        .collect()
}

/// Delta contents of an SSE body, sentinel excluded
pub fn sse_contents(body: &str) -> Vec<String> {
    sse_data(body)
        .iter()
        .filter(|data| data.as_str() != "[DONE]")
        .map(|data| {
            let chunk: serde_json::Value =
                serde_json::from_str(data).expect("chunk should be JSON");
            chunk["choices"][0]["delta"]["content"]
                .as_str()
                .expect("chunk should carry content")
                .to_string()
        })
        .collect()
}
