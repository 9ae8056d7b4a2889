//! HTTP upstream client
//!
//! Posts translated payloads to the upstream chat endpoint and hands back the
//! unread response body for re-framing.

use async_trait::async_trait;
use tracing::{debug, error, instrument, warn};

use super::headers::{build_upstream_headers, UpstreamIdentity};
use super::provider::{UpstreamInvoker, UpstreamResponse};
use crate::{
    config::Config,
    error::{AppError, AppResult},
    translate::UpstreamPayload,
};

/// Upstream chat service client
pub struct HttpUpstream {
    client: reqwest::Client,
    url: String,
    identity: UpstreamIdentity,
}

impl HttpUpstream {
    /// Create a new upstream client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            url: config.upstream_url.clone(),
            identity: UpstreamIdentity {
                origin: config.upstream_origin.clone(),
                referer: config.upstream_referer.clone(),
                user_agent: config.upstream_user_agent.clone(),
            },
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl UpstreamInvoker for HttpUpstream {
    fn name(&self) -> &'static str {
        "heck"
    }

    #[instrument(skip(self, payload, credential), fields(model = %payload.model))]
    async fn invoke(
        &self,
        payload: &UpstreamPayload,
        credential: Option<&str>,
    ) -> AppResult<UpstreamResponse> {
        let headers = build_upstream_headers(&self.identity, credential)?;

        debug!(url = %self.url, "Sending request to upstream");

        let response = self
            .client
            .post(&self.url)
            .headers(headers)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.url, error = %e, "Failed to send request to upstream");
                e
            })?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body_len = text.len(), "Upstream returned error status");
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        if response.content_length() == Some(0) {
            warn!(status = %status, "Upstream returned an empty body");
            return Err(AppError::EmptyUpstreamBody {
                status: status.as_u16(),
            });
        }

        debug!(status = %status, content_length = ?response.content_length(), "Upstream stream opened");

        Ok(UpstreamResponse {
            status: status.as_u16(),
            body: Box::pin(response.bytes_stream()),
        })
    }
}
