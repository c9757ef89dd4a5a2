//! Success envelopes shared by several handlers.

use serde::Serialize;
use utoipa::ToSchema;

/// Value of `status` in every success envelope except `/health`.
pub const SUCCESS: &str = "success";

/// `{status, message}` body for endpoints that return nothing else.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Always `success`.
    #[schema(value_type = String, example = "success")]
    pub status: &'static str,
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    /// Success envelope with `message`.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: SUCCESS,
            message: message.into(),
        }
    }
}
