//! Header utilities for upstream requests
//!
//! Builds the fixed header set the upstream expects. Only the caller's
//! Authorization header is forwarded; no other client header is passed on.

use anyhow::{Context, Result};
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT,
};

/// Browser-like identity presented to the upstream
#[derive(Debug, Clone)]
pub struct UpstreamIdentity {
    pub origin: String,
    pub referer: String,
    pub user_agent: String,
}

/// Build headers for one upstream request
pub fn build_upstream_headers(
    identity: &UpstreamIdentity,
    credential: Option<&str>,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        ORIGIN,
        HeaderValue::from_str(&identity.origin).context("Invalid upstream Origin")?,
    );
    headers.insert(
        REFERER,
        HeaderValue::from_str(&identity.referer).context("Invalid upstream Referer")?,
    );
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&identity.user_agent).context("Invalid upstream User-Agent")?,
    );

    if let Some(credential) = credential {
        let mut value =
            HeaderValue::from_str(credential).context("Invalid Authorization header value")?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}
