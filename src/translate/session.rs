//! Session identifier strategies
//!
//! The upstream correlates a request with a conversation through an opaque
//! session id. It is either freshly generated per request or derived from the
//! caller's bearer token.

use uuid::Uuid;

use super::TranslationError;
use crate::config::SessionIdMode;

/// Prefix stripped from forwarded credentials
pub const BEARER_PREFIX: &str = "Bearer ";

/// How the session id for one request is produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionIdPolicy {
    /// Random UUIDv4 (122 bits of entropy) per request
    Generate,
    /// The raw token, bearer prefix stripped, used verbatim
    DeriveFromToken(String),
}

impl SessionIdPolicy {
    /// Select the policy for one request.
    ///
    /// `credential` is the raw `Authorization` header value, if any. A blank
    /// value counts as absent.
    pub fn for_request(
        mode: SessionIdMode,
        require_auth: bool,
        credential: Option<&str>,
    ) -> Result<Self, TranslationError> {
        let credential = present_credential(credential);
        match mode {
            SessionIdMode::Generate => {
                if require_auth && credential.is_none() {
                    return Err(TranslationError::MissingCredential);
                }
                Ok(SessionIdPolicy::Generate)
            }
            SessionIdMode::Token => {
                let raw = credential.ok_or(TranslationError::MissingCredential)?;
                if strip_bearer(raw).is_empty() {
                    return Err(TranslationError::MissingCredential);
                }
                Ok(SessionIdPolicy::DeriveFromToken(raw.to_string()))
            }
        }
    }

    /// Produce the session id
    pub fn session_id(&self) -> String {
        match self {
            SessionIdPolicy::Generate => Uuid::new_v4().to_string(),
            SessionIdPolicy::DeriveFromToken(raw) => strip_bearer(raw).to_string(),
        }
    }

    /// Whether the caller's credential is consumed as the session id
    pub fn consumes_credential(&self) -> bool {
        matches!(self, SessionIdPolicy::DeriveFromToken(_))
    }
}

/// Drop blank credentials
pub fn present_credential(credential: Option<&str>) -> Option<&str> {
    credential.map(str::trim).filter(|c| !c.is_empty())
}

/// Strip the bearer scheme from a token; tokens without it are returned as-is.
///
/// The scheme is matched case-insensitively.
pub fn strip_bearer(raw: &str) -> &str {
    let raw = raw.trim();
    let scheme = BEARER_PREFIX.trim_end();

    match raw.get(..scheme.len()) {
        Some(head) if head.eq_ignore_ascii_case(scheme) => {
            let rest = &raw[scheme.len()..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                rest.trim_start()
            } else {
                raw
            }
        }
        _ => raw,
    }
}
