//! Chat Adapter - OpenAI-compatible front for an NDJSON chat upstream
//!
//! This library provides the core functionality for the adapter server.
//! It translates chat completion requests into upstream payloads and
//! re-frames the upstream's event stream as OpenAI streaming chunks.

pub mod config;
pub mod error;
pub mod proxy;
pub mod registry;
pub mod routes;
pub mod streaming;
pub mod translate;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};

pub use crate::config::Config;
pub use crate::proxy::{HttpUpstream, UpstreamInvoker};
pub use crate::registry::ModelRegistry;
pub use crate::translate::RequestTranslator;

/// Application state shared across all request handlers
///
/// Everything here is immutable after startup; per-request state lives in
/// the handlers.
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    /// Public → upstream model table
    pub registry: Arc<ModelRegistry>,
    /// Request → upstream payload translation
    pub translator: RequestTranslator,
    /// Upstream chat service
    pub upstream: Arc<dyn UpstreamInvoker>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // Initialize HTTP client with connection pooling
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .build()?;

        let upstream: Arc<dyn UpstreamInvoker> = Arc::new(HttpUpstream::new(http_client, &config));

        Self::with_upstream(config, upstream)
    }

    /// Create an application state with a specific upstream
    pub fn with_upstream(config: Config, upstream: Arc<dyn UpstreamInvoker>) -> Result<Self> {
        let registry = Arc::new(
            ModelRegistry::new(config.model_map.clone()).context("Invalid model table")?,
        );
        let translator = RequestTranslator::new(registry.clone(), config.upstream_language.clone());

        Ok(Self {
            config,
            start_time: Instant::now(),
            registry,
            translator,
            upstream,
        })
    }
}
