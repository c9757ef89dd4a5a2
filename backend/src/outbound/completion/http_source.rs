//! Reqwest-backed completion source adapter.
//!
//! This adapter owns transport details only: request serialisation, bearer
//! authentication, timeout and HTTP error mapping, and extraction of the first
//! choice's text. Prompt wording and reply parsing live in the domain.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use zeroize::Zeroizing;

use super::dto::{ChatCompletionRequestDto, ChatCompletionResponseDto};
use crate::domain::ports::{CompletionRequest, CompletionSource, CompletionSourceError};

/// Connection and model settings for the completion endpoint.
pub struct CompletionHttpSettings {
    /// Chat completions URL.
    pub endpoint: Url,
    /// Bearer token sent with every request.
    pub api_key: Zeroizing<String>,
    /// Model identifier.
    pub model: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl fmt::Debug for CompletionHttpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionHttpSettings")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Completion source that POSTs chat completion requests to one endpoint.
pub struct CompletionHttpSource {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
    model: String,
    max_tokens: u32,
}

impl CompletionHttpSource {
    /// Build an adapter using a reqwest client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: CompletionHttpSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            endpoint: settings.endpoint,
            api_key: settings.api_key,
            model: settings.model,
            max_tokens: settings.max_tokens.max(1),
        })
    }
}

#[async_trait]
impl CompletionSource for CompletionHttpSource {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionSourceError> {
        let body =
            ChatCompletionRequestDto::user_prompt(&self.model, &request.prompt, self.max_tokens);
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }

        parse_reply_text(bytes.as_ref())
    }
}

fn parse_reply_text(body: &[u8]) -> Result<String, CompletionSourceError> {
    let decoded: ChatCompletionResponseDto = serde_json::from_slice(body).map_err(|error| {
        CompletionSourceError::decode(format!("invalid completion JSON payload: {error}"))
    })?;
    decoded
        .into_first_content()
        .ok_or_else(CompletionSourceError::missing_content)
}

fn map_transport_error(error: reqwest::Error) -> CompletionSourceError {
    if error.is_timeout() {
        CompletionSourceError::timeout(error.to_string())
    } else {
        CompletionSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CompletionSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => CompletionSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CompletionSourceError::timeout(message)
        }
        _ if status.is_client_error() => CompletionSourceError::invalid_request(message),
        _ => CompletionSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
