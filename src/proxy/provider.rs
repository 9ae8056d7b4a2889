//! Upstream invoker abstraction
//!
//! Defines the seam between the adapter core and the HTTP call to the
//! upstream chat service, so tests and alternative upstreams can substitute it.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

use crate::error::AppResult;
use crate::translate::UpstreamPayload;

/// Stream type for streaming responses from the upstream
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// Successful upstream response: status plus an unread body
pub struct UpstreamResponse {
    pub status: u16,
    pub body: ByteStream,
}

impl std::fmt::Debug for UpstreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Trait defining the interface for upstream chat services
///
/// Implementations perform exactly one call per invocation and never retry.
/// A non-success status must be returned as [`AppError::Upstream`] with the
/// fully buffered body; a success with an empty body as
/// [`AppError::EmptyUpstreamBody`].
///
/// [`AppError::Upstream`]: crate::error::AppError::Upstream
/// [`AppError::EmptyUpstreamBody`]: crate::error::AppError::EmptyUpstreamBody
#[async_trait]
pub trait UpstreamInvoker: Send + Sync {
    /// Upstream name for logging
    fn name(&self) -> &'static str;

    /// Send one payload, forwarding `credential` as the Authorization header when given
    async fn invoke(
        &self,
        payload: &UpstreamPayload,
        credential: Option<&str>,
    ) -> AppResult<UpstreamResponse>;
}
