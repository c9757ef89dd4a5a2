//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request DTOs keep every field optional so a missing field becomes a
//! `400` naming that field instead of a generic deserialisation failure.

use std::fmt;

use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    CredentialsValidationError, Error, FeedbackValidationError, TripValidationError, Username,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code,
        }))
    }

    fn with_value(self, code: &str, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code,
        }))
    }
}

/// Domain validation failures that know which request field they concern.
pub(crate) trait FieldFailure: fmt::Display {
    fn field(&self) -> &'static str;
    fn code(&self) -> &'static str;
}

macro_rules! impl_field_failure {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FieldFailure for $ty {
                fn field(&self) -> &'static str {
                    <$ty>::field(self)
                }

                fn code(&self) -> &'static str {
                    <$ty>::code(self)
                }
            }
        )+
    };
}

impl_field_failure!(
    CredentialsValidationError,
    TripValidationError,
    FeedbackValidationError,
);

/// Convert a domain validation failure into a `400` carrying its field.
pub(crate) fn field_error(failure: &impl FieldFailure) -> Error {
    ValidationError::new(failure.field(), failure.to_string()).with_code(failure.code())
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField.as_str())
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid.as_str(), value)
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| invalid_uuid_error(field, value))
}

/// Require a non-blank text field, returning it trimmed.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| missing_field_error(field))
}

/// Trim an optional text field, treating blank as absent.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// Require and validate the `username` field.
pub(crate) fn require_username(value: Option<String>) -> Result<Username, Error> {
    let raw = value.ok_or_else(|| missing_field_error(FieldName::new("username")))?;
    Username::new(raw).map_err(|err| field_error(&err))
}

/// A JSON value accepted as either a string or a number and kept as text.
///
/// Clients send values such as group size and ratings both ways.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlexibleText {
    Text(String),
    Number(serde_json::Number),
}

impl FlexibleText {
    /// Text form, trimmed for strings and canonical for numbers.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text.trim().to_owned(),
            Self::Number(number) => number.to_string(),
        }
    }
}

pub(crate) fn require_flexible(
    value: Option<FlexibleText>,
    field: FieldName,
) -> Result<String, Error> {
    require_text(value.map(FlexibleText::into_text), field)
}

pub(crate) fn optional_flexible(value: Option<FlexibleText>) -> Option<String> {
    optional_text(value.map(FlexibleText::into_text))
}
