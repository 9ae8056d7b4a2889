//! Mock infrastructure for testing external services
//!
//! The only external dependency is the upstream chat service, which answers
//! with newline-delimited JSON events.

#![allow(dead_code)]

pub mod upstream;

pub use upstream::*;
