//! Tests for trip handlers.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{DisabledCompletionSource, MockTripCommand, UserRepository};
use crate::domain::test_fixtures::{fixture_timestamp, sample_profile, username};
use crate::domain::{FALLBACK_EVENT_NAME, PasswordHash, UserAccount};
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::test_utils::{
    in_memory_state, in_memory_state_with, session_cookie, test_session_middleware,
};
use crate::inbound::http::users::login;
use crate::outbound::memory::InMemoryStore;

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(test_session_middleware())
        .service(start_trip)
        .service(next_event)
        .service(list_trip_events)
        .service(login)
}

async fn seed_user(store: &InMemoryStore, name: &str) {
    store
        .create(&UserAccount {
            username: username(name),
            password_hash: PasswordHash::new("$argon2id$unused"),
            profile: sample_profile(),
            created_at: fixture_timestamp(),
        })
        .await
        .expect("seed user");
}

fn start_body(name: &str) -> Value {
    json!({
        "username": name,
        "budget": "mid-range",
        "type_of_group": "friends",
        "group_size": 4,
        "duration_of_trip": 2,
        "trip_location": "Porto",
        "current_location": "Ribeira",
        "child_friendly": true,
    })
}

fn next_body(name: &str, trip_id: &str) -> Value {
    json!({
        "username": name,
        "trip_id": trip_id,
        "mood": "happy",
        "current_location": "Cais da Ribeira",
        "prev_event_rating": 4,
    })
}

async fn post(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
    body: Value,
) -> ServiceResponse {
    actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri(uri)
            .set_json(body)
            .to_request(),
    )
    .await
}

#[actix_web::test]
async fn start_trip_returns_first_event() {
    let (state, store) = in_memory_state();
    seed_user(&store, "alice").await;
    let app = actix_test::init_service(test_app(state)).await;

    let res = post(&app, "/start-trip", start_body("alice")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], START_TRIP_MESSAGE);
    assert!(uuid::Uuid::parse_str(body["trip_id"].as_str().expect("trip id")).is_ok());
    let event = &body["next_event"];
    assert_eq!(event["sequence"], 1);
    assert_eq!(event["name"], "Riverside food market");
    assert_eq!(event["location"], "Riverside Walk");
    assert_eq!(event["duration"], "1-2 hours");
    assert_eq!(event["cost"], "Varies");
    assert_eq!(event["source"], "model");
    assert_eq!(store.event_count(), 1);
}

#[actix_web::test]
async fn start_trip_falls_back_without_model() {
    let (state, store) = in_memory_state_with(Arc::new(DisabledCompletionSource));
    seed_user(&store, "alice").await;
    let app = actix_test::init_service(test_app(state)).await;

    let res = post(&app, "/start-trip", start_body("alice")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    let event = &body["next_event"];
    assert_eq!(event["name"], FALLBACK_EVENT_NAME);
    assert_eq!(event["location"], "Ribeira");
    assert_eq!(event["source"], "fallback");
    assert!(!event["description"].as_str().unwrap_or_default().is_empty());
}

#[actix_web::test]
async fn start_trip_for_unknown_user_is_not_found() {
    let (state, store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = post(&app, "/start-trip", start_body("ghost")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "User not found");
    assert_eq!(store.event_count(), 0);
}

#[actix_web::test]
async fn next_event_sequences_follow_history() {
    let (state, store) = in_memory_state();
    seed_user(&store, "alice").await;
    let app = actix_test::init_service(test_app(state)).await;

    let started: Value =
        actix_test::read_body_json(post(&app, "/start-trip", start_body("alice")).await).await;
    let trip_id = started["trip_id"].as_str().expect("trip id").to_owned();

    for expected in [2, 3] {
        let res = post(&app, "/next-event", next_body("alice", &trip_id)).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], NEXT_EVENT_MESSAGE);
        assert_eq!(body["next_event"]["sequence"], expected);
    }

    let feedback = store.feedback_records();
    assert_eq!(feedback.len(), 2);
    assert!(feedback.iter().all(|record| record.trip_id.is_some()));
    assert_eq!(feedback[0].prev_event_rating.as_deref(), Some("4"));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/trips/{trip_id}/events"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let history: Value = actix_test::read_body_json(res).await;
    assert_eq!(history["trip_id"], trip_id.as_str());
    let sequences: Vec<u64> = history["events"]
        .as_array()
        .expect("events array")
        .iter()
        .filter_map(|event| event["sequence"].as_u64())
        .collect();
    assert_eq!(sequences, vec![1, 2, 3]);
    assert_eq!(history["events"][0]["status"], "pending");
}

#[actix_web::test]
async fn next_event_for_missing_trip_writes_nothing() {
    let (state, store) = in_memory_state();
    seed_user(&store, "alice").await;
    let app = actix_test::init_service(test_app(state)).await;

    let res = post(
        &app,
        "/next-event",
        next_body("alice", "3fa85f64-5717-4562-b3fc-2c963f66afa6"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Trip not found");
    assert!(store.feedback_records().is_empty());
    assert_eq!(store.event_count(), 0);
}

#[actix_web::test]
async fn next_event_for_someone_elses_trip_is_not_found() {
    let (state, store) = in_memory_state();
    seed_user(&store, "alice").await;
    seed_user(&store, "bob").await;
    let app = actix_test::init_service(test_app(state)).await;

    let started: Value =
        actix_test::read_body_json(post(&app, "/start-trip", start_body("alice")).await).await;
    let trip_id = started["trip_id"].as_str().expect("trip id").to_owned();

    let res = post(&app, "/next-event", next_body("bob", &trip_id)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.event_count(), 1);
}

#[rstest]
#[case("/start-trip")]
#[case("/next-event")]
#[actix_web::test]
async fn body_username_must_match_session(#[case] uri: &str) {
    let mut trips = MockTripCommand::new();
    trips.expect_start_trip().never();
    trips.expect_next_event().never();
    let (mut state, _store) = in_memory_state();
    state.trips = Arc::new(trips);
    let mut login_port = crate::domain::ports::MockLoginService::new();
    login_port
        .expect_authenticate()
        .returning(|creds| Ok(creds.username().clone()));
    state.login = Arc::new(login_port);
    let app = actix_test::init_service(test_app(state)).await;

    let logged_in = post(&app, "/login", json!({"username": "alice", "password": "pw"})).await;
    let cookie = session_cookie(&logged_in);

    let body = if uri == "/start-trip" {
        start_body("bob")
    } else {
        next_body("bob", "3fa85f64-5717-4562-b3fc-2c963f66afa6")
    };
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(uri)
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn history_rejects_malformed_trip_id() {
    let (state, _store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/trips/not-a-uuid/events")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "invalid_uuid");
}
