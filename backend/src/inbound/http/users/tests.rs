//! Tests for account handlers.

use super::*;
use crate::domain::ports::{
    MockLoginService, MockSignupService, MockUserRepository, UserPersistenceError,
};
use crate::domain::{AccountService, Error as DomainError, Username};
use crate::outbound::crypto::Argon2CredentialHasher;
use mockable::DefaultClock;
use crate::inbound::http::test_utils::{in_memory_state, session_cookie, test_session_middleware};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(
            web::JsonConfig::default()
                .error_handler(crate::inbound::http::error::json_error_handler),
        )
        .wrap(test_session_middleware())
        .service(signup)
        .service(login)
}

fn signup_body(username: &str, password: &str) -> Value {
    json!({
        "username": username,
        "password": password,
        "gender": "female",
        "age": "25-34",
        "ethnicity": "prefer not to say",
    })
}

async fn post_json(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    uri: &str,
    body: Value,
) -> actix_web::dev::ServiceResponse {
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    actix_test::call_service(app, request).await
}

#[actix_web::test]
async fn signup_then_login_scenario() {
    let (state, _store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let created = post_json(&app, "/signup", signup_body("alice", "pw1")).await;
    assert_eq!(created.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(created).await;
    assert_eq!(
        body,
        json!({"status": "success", "message": SIGNUP_SUCCESS_MESSAGE})
    );

    let duplicate = post_json(&app, "/signup", signup_body("alice", "other")).await;
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(duplicate).await;
    assert_eq!(body["message"], "User already exists");

    let wrong = post_json(
        &app,
        "/login",
        json!({"username": "alice", "password": "wrong"}),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(wrong).await;
    assert_eq!(body["message"], "Invalid password");

    let ok = post_json(&app, "/login", json!({"username": "alice", "password": "pw1"})).await;
    assert_eq!(ok.status(), StatusCode::OK);
    let _cookie = session_cookie(&ok);
    let body: Value = actix_test::read_body_json(ok).await;
    assert_eq!(
        body,
        json!({"status": "success", "message": LOGIN_SUCCESS_MESSAGE})
    );
}

#[actix_web::test]
async fn login_unknown_user_is_not_found() {
    let (state, _store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = post_json(&app, "/login", json!({"username": "nobody", "password": "pw"})).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.response().cookies().next().is_none());
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["message"], "User not found");
}

#[rstest]
#[case(json!({"password": "pw"}), "username", "missing_field")]
#[case(json!({"username": "alice"}), "password", "missing_field")]
#[case(json!({"username": "   ", "password": "pw"}), "username", "empty_username")]
#[case(json!({"username": "alice", "password": ""}), "password", "empty_password")]
#[actix_web::test]
async fn login_validation_errors_name_the_field(
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut login_port = MockLoginService::new();
    login_port.expect_authenticate().never();
    let (mut state, _store) = in_memory_state();
    state.login = Arc::new(login_port);
    let app = actix_test::init_service(test_app(state)).await;

    let res = post_json(&app, "/login", body).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(res).await;
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["field"], field);
    assert_eq!(value["details"]["code"], code);
}

#[rstest]
#[case("gender")]
#[case("age")]
#[case("ethnicity")]
#[actix_web::test]
async fn signup_requires_profile_fields(#[case] missing: &str) {
    let mut signup_port = MockSignupService::new();
    signup_port.expect_register().never();
    let (mut state, _store) = in_memory_state();
    state.signup = Arc::new(signup_port);
    let app = actix_test::init_service(test_app(state)).await;

    let mut body = signup_body("alice", "pw1");
    body.as_object_mut()
        .expect("object body")
        .remove(missing);

    let res = post_json(&app, "/signup", body).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(res).await;
    assert_eq!(value["details"]["field"], missing);
    assert_eq!(value["details"]["code"], "missing_field");
}

#[actix_web::test]
async fn signup_passes_trimmed_username_and_profile_to_port() {
    let mut signup_port = MockSignupService::new();
    signup_port
        .expect_register()
        .withf(|request| {
            request.credentials.username().as_ref() == "alice"
                && request.credentials.password() == " pw1 "
                && request.profile.age == "25-34"
        })
        .times(1)
        .returning(|request| Ok(request.credentials.username().clone()));
    let (mut state, _store) = in_memory_state();
    state.signup = Arc::new(signup_port);
    let app = actix_test::init_service(test_app(state)).await;

    let res = post_json(&app, "/signup", signup_body("  alice ", " pw1 ")).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn internal_failures_are_redacted() {
    let mut login_port = MockLoginService::new();
    login_port
        .expect_authenticate()
        .returning(|_| Err(DomainError::internal("argon2 blew up")));
    let (mut state, _store) = in_memory_state();
    state.login = Arc::new(login_port);
    let app = actix_test::init_service(test_app(state)).await;

    let res = post_json(&app, "/login", json!({"username": "alice", "password": "pw"})).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let value: Value = actix_test::read_body_json(res).await;
    assert_eq!(value["message"], "Internal server error");
}

#[actix_web::test]
async fn store_outage_hides_the_connection_error() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| {
        Err(UserPersistenceError::connection(
            "connection to server at \"db.internal\" (10.0.0.5), port 5432 failed",
        ))
    });
    let (mut state, _store) = in_memory_state();
    state.login = Arc::new(AccountService::new(
        Arc::new(users),
        Arc::new(Argon2CredentialHasher::new()),
        Arc::new(DefaultClock),
    ));
    let app = actix_test::init_service(test_app(state)).await;

    let res = post_json(&app, "/login", json!({"username": "alice", "password": "pw"})).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let value: Value = actix_test::read_body_json(res).await;
    assert_eq!(value["code"], "service_unavailable");
    assert_eq!(value["message"], "Service unavailable");
    assert!(!value.to_string().contains("db.internal"));
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let (state, _store) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::post()
        .uri("/signup")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"username\": \"alice\",")
        .to_request();
    let res = actix_test::call_service(&app, request).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(res).await;
    assert_eq!(value["code"], "invalid_request");
}

#[actix_web::test]
async fn session_carries_the_logged_in_username() {
    let mut login_port = MockLoginService::new();
    login_port
        .expect_authenticate()
        .returning(|creds| Ok(creds.username().clone()));
    let (mut state, _store) = in_memory_state();
    state.login = Arc::new(login_port);
    let app = actix_test::init_service(
        test_app(state).route(
            "/whoami",
            web::get().to(|session: SessionContext| async move {
                let name = session
                    .username()?
                    .map(|name: Username| name.to_string())
                    .unwrap_or_default();
                Ok::<_, DomainError>(HttpResponse::Ok().body(name))
            }),
        ),
    )
    .await;

    let res = post_json(&app, "/login", json!({"username": "bob", "password": "pw"})).await;
    let cookie = session_cookie(&res);
    let whoami = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/whoami")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(actix_test::read_body(whoami).await, "bob");
}
