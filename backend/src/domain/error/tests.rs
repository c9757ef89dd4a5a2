//! Tests for domain error construction and serialisation.

use super::*;
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("Invalid password"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("session user mismatch"), ErrorCode::Forbidden)]
#[case(Error::not_found("User not found"), ErrorCode::NotFound)]
#[case(Error::conflict("busy"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("db down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[tokio::test]
async fn new_captures_scoped_trace_id() {
    let trace_id = TraceId::from_uuid(Uuid::nil());
    let error = TraceId::scope(trace_id, async { Error::not_found("missing") }).await;
    assert_eq!(
        error.trace_id(),
        Some("00000000-0000-0000-0000-000000000000")
    );
}

#[rstest]
fn serialises_with_camel_case_and_skips_empty_fields() {
    let plain = serde_json::to_value(Error::not_found("Trip not found")).expect("serialise");
    assert_eq!(
        plain,
        json!({ "code": "not_found", "message": "Trip not found" })
    );

    let detailed = Error::invalid_request("username must not be empty")
        .with_trace_id("abc")
        .with_details(json!({ "field": "username", "code": "empty_username" }));
    let value = serde_json::to_value(detailed).expect("serialise");
    assert_eq!(value["traceId"], "abc");
    assert_eq!(value["details"]["field"], "username");
}

#[rstest]
fn deserialises_snake_case_trace_id_alias() {
    let error: Error = serde_json::from_value(json!({
        "code": "service_unavailable",
        "message": "db down",
        "trace_id": "xyz"
    }))
    .expect("deserialise");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(error.trace_id(), Some("xyz"));
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::forbidden("nope").to_string(), "nope");
}
