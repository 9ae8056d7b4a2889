//! Proxy module
//!
//! Handles request forwarding to the upstream chat service.

pub mod headers;
pub mod logging;
pub mod provider;
pub mod upstream;

pub use logging::RequestContext;
pub use provider::{ByteStream, UpstreamInvoker, UpstreamResponse};
pub use upstream::HttpUpstream;
