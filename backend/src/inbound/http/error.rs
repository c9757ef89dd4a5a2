//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes. Extractor failures (bad JSON bodies, bad path segments) go through
//! the same envelope via [`json_error_handler`] and [`path_error_handler`].

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{debug, error};

pub use crate::domain::ApiResult;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Replace server-side failure messages with a fixed client-facing one.
///
/// The original message carries store or upstream causes; it is logged here
/// and never serialised.
fn redact_server_error(error: &Error) -> Error {
    let mut redacted = match error.code() {
        ErrorCode::InternalError => {
            error!(message = %error.message(), "internal error returned to client");
            Error::internal("Internal server error")
        }
        ErrorCode::ServiceUnavailable => {
            error!(message = %error.message(), "dependency unavailable");
            Error::service_unavailable("Service unavailable")
        }
        _ => return error.clone(),
    };
    if let Some(id) = error.trace_id() {
        redacted = redacted.with_trace_id(id.to_owned());
    }
    redacted
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_server_error(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

fn json_payload_error(err: &JsonPayloadError) -> Error {
    match err {
        JsonPayloadError::ContentType => {
            Error::invalid_request("request body must be JSON").with_details(json!({
                "code": "invalid_content_type",
            }))
        }
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            Error::invalid_request("request body is too large").with_details(json!({
                "code": "payload_too_large",
            }))
        }
        JsonPayloadError::Deserialize(source) if source.is_data() => {
            Error::invalid_request(format!("invalid request body: {source}")).with_details(
                json!({
                    "code": "invalid_field",
                }),
            )
        }
        other => Error::invalid_request(format!("malformed JSON body: {other}")).with_details(
            json!({
                "code": "malformed_json",
            }),
        ),
    }
}

/// Map JSON extractor failures onto the `invalid_request` envelope.
///
/// Install with `web::JsonConfig::default().error_handler(json_error_handler)`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected JSON body");
    json_payload_error(&err).into()
}

/// Map path extractor failures onto the `invalid_request` envelope.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected path parameters");
    Error::invalid_request(format!("invalid path: {err}"))
        .with_details(json!({ "code": "invalid_path" }))
        .into()
}

#[cfg(test)]
mod tests;
