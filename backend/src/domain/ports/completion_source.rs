//! Driven port for the external text-completion model.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by completion source adapters.
    pub enum CompletionSourceError {
        /// Network or server-side failure.
        Transport { message: String } => "completion transport failed: {message}",
        /// The request timed out.
        Timeout { message: String } => "completion request timed out: {message}",
        /// The upstream rejected the request for rate limiting.
        RateLimited { message: String } => "completion request was rate limited: {message}",
        /// The upstream rejected the request as invalid.
        InvalidRequest { message: String } => "completion request was rejected: {message}",
        /// The response body could not be decoded.
        Decode { message: String } => "completion response could not be decoded: {message}",
        /// The response carried no reply text.
        MissingContent => "completion response contained no text",
        /// No completion endpoint credentials are configured.
        Disabled => "completion source is not configured",
    }
}

/// A single prompt to complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Rendered prompt text.
    pub prompt: String,
}

/// Port for requesting free-text completions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionSource: Send + Sync {
    /// Return the model's reply text for the prompt.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionSourceError>;
}

/// Completion source used when no model credentials are configured.
///
/// Every call fails with [`CompletionSourceError::Disabled`], so callers
/// always take their fallback path.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledCompletionSource;

#[async_trait]
impl CompletionSource for DisabledCompletionSource {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionSourceError> {
        Err(CompletionSourceError::disabled())
    }
}

/// Deterministic completion source for tests and local development.
///
/// Replies with a well-formed three-line suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureCompletionSource {
    reply: String,
}

impl FixtureCompletionSource {
    /// Reply with custom text.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl Default for FixtureCompletionSource {
    fn default() -> Self {
        Self::with_reply(
            "- Name: Riverside food market\n\
             - Description: Sample local street food from the weekend stalls.\n\
             - Location: Riverside Walk",
        )
    }
}

#[async_trait]
impl CompletionSource for FixtureCompletionSource {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionSourceError> {
        Ok(self.reply.clone())
    }
}
