//! Integration tests for the chat adapter
//!
//! These drive the real router against a wiremock upstream and check the
//! complete request/response flow, SSE framing included.

mod models;
