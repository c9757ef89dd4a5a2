//! Completion model outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `CompletionSource`
//! port against an OpenAI-compatible chat completions endpoint.

mod dto;
mod http_source;

pub use http_source::{CompletionHttpSettings, CompletionHttpSource};
