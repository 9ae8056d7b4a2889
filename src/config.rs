//! Configuration management for the chat adapter
//!
//! Configuration is loaded from environment variables.

use anyhow::{bail, Context, Result};
use std::env;

/// Default upstream chat endpoint
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.heckai.weight-wave.com/api/ha/v1/chat";

/// Default public → upstream model table
pub const DEFAULT_MODEL_MAP: &str =
    "deepseek-chat=deepseek/deepseek-chat,deepseek-reasoner=deepseek/deepseek-reasoner";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/140.0.0.0 Safari/537.36 Edg/140.0.0.0";

/// How the upstream session identifier is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionIdMode {
    /// Fresh random identifier per request
    Generate,
    /// Caller's bearer token, prefix stripped
    Token,
}

impl SessionIdMode {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "generate" => Ok(SessionIdMode::Generate),
            "token" => Ok(SessionIdMode::Token),
            other => bail!("Invalid SESSION_ID_MODE '{}': expected 'generate' or 'token'", other),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Upstream chat endpoint (full URL)
    pub upstream_url: String,
    /// Origin header sent upstream
    pub upstream_origin: String,
    /// Referer header sent upstream
    pub upstream_referer: String,
    /// User-Agent header sent upstream
    pub upstream_user_agent: String,
    /// Language flag in the upstream payload
    pub upstream_language: String,

    /// Ordered (public id, upstream id) pairs
    pub model_map: Vec<(String, String)>,

    /// Session identifier strategy
    pub session_id_mode: SessionIdMode,
    /// Reject requests without an Authorization header (generate mode)
    pub require_auth: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let model_map = parse_model_map(
            &env::var("ADAPTER_MODEL_MAP").unwrap_or_else(|_| DEFAULT_MODEL_MAP.to_string()),
        )
        .context("Invalid ADAPTER_MODEL_MAP")?;

        Ok(Self {
            host: env::var("ADAPTER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("ADAPTER_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("Invalid ADAPTER_PORT")?,

            upstream_url: env::var("UPSTREAM_URL")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string()),
            upstream_origin: env::var("UPSTREAM_ORIGIN")
                .unwrap_or_else(|_| "https://heck.ai".to_string()),
            upstream_referer: env::var("UPSTREAM_REFERER")
                .unwrap_or_else(|_| "https://api.heckai.weight-wave.com/".to_string()),
            upstream_user_agent: env::var("UPSTREAM_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            upstream_language: env::var("UPSTREAM_LANGUAGE")
                .unwrap_or_else(|_| "English".to_string()),

            model_map,

            session_id_mode: SessionIdMode::parse(
                &env::var("SESSION_ID_MODE").unwrap_or_else(|_| "generate".to_string()),
            )?,
            require_auth: match env::var("REQUIRE_AUTH") {
                Ok(v) => parse_flag(&v).context("Invalid REQUIRE_AUTH")?,
                Err(_) => true,
            },
        })
    }

    /// Configuration pointing at the given upstream, with defaults elsewhere
    pub fn for_upstream(upstream_url: impl Into<String>, model_map: Vec<(String, String)>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            upstream_url: upstream_url.into(),
            upstream_origin: "https://heck.ai".to_string(),
            upstream_referer: "https://api.heckai.weight-wave.com/".to_string(),
            upstream_user_agent: DEFAULT_USER_AGENT.to_string(),
            upstream_language: "English".to_string(),
            model_map,
            session_id_mode: SessionIdMode::Generate,
            require_auth: true,
        }
    }
}

/// Parse `public=upstream` pairs separated by commas, preserving order.
pub fn parse_model_map(raw: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (public, upstream) = entry
            .split_once('=')
            .with_context(|| format!("Mapping '{}' must look like public=upstream", entry))?;
        let (public, upstream) = (public.trim(), upstream.trim());
        if public.is_empty() || upstream.is_empty() {
            bail!("Mapping '{}' has an empty side", entry);
        }
        pairs.push((public.to_string(), upstream.to_string()));
    }

    Ok(pairs)
}

/// Parse a boolean flag; unknown values are rejected rather than read as false
fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{}'", other),
    }
}
