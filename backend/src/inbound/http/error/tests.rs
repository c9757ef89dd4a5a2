//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, HttpResponse, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("Invalid password"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("Trip not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn response_parts(error: Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace header is ASCII").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, header, body)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("database password rejected")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let (status, header, body) = response_parts(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "message": "Internal server error",
            "traceId": expected_trace_id,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn unavailable_errors_hide_the_cause(expected_trace_id: String) {
    let error = Error::service_unavailable(
        "user repository unavailable: connection to server at \"db.internal\" (10.0.0.5), port 5432 failed",
    )
    .with_trace_id(expected_trace_id.clone());

    let (status, header, body) = response_parts(error).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(
        body,
        json!({
            "code": "service_unavailable",
            "message": "Service unavailable",
            "traceId": expected_trace_id,
        })
    );
    assert!(!body.to_string().contains("db.internal"));
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(expected_trace_id: String) {
    let error = Error::invalid_request("missing required field: username")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "username", "code": "missing_field"}));

    let (status, header, body) = response_parts(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(body["message"], "missing required field: username");
    assert_eq!(body["details"]["field"], "username");
    assert_eq!(body["details"]["code"], "missing_field");
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let (status, header, body) = response_parts(Error::not_found("User not found")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(header.is_none());
    assert!(body.get("traceId").is_none());
    assert_eq!(body["message"], "User not found");
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[derive(serde::Deserialize)]
struct EchoBody {
    #[expect(dead_code, reason = "only deserialisation is exercised")]
    count: u32,
}

#[rstest]
#[case("{\"count\": ", "malformed_json")]
#[case("{\"count\": \"many\"}", "invalid_field")]
#[actix_web::test]
async fn json_extractor_failures_use_error_envelope(
    #[case] payload: &'static str,
    #[case] expected_code: &str,
) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(
                "/echo",
                web::post().to(|_: web::Json<EchoBody>| async { HttpResponse::Ok() }),
            ),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/echo")
        .insert_header(("content-type", "application/json"))
        .set_payload(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], expected_code);
}

#[actix_web::test]
async fn non_json_content_type_is_rejected() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(
                "/echo",
                web::post().to(|_: web::Json<EchoBody>| async { HttpResponse::Ok() }),
            ),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/echo")
        .insert_header(("content-type", "text/plain"))
        .set_payload("count=1")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_content_type");
}
