//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every handler's `utoipa::path` annotation and the
//! request/response payloads. Error bodies are described through the schema
//! wrappers in [`crate::inbound::http::schemas`] so domain types stay free of
//! utoipa derives.
//!
//! The document backs Swagger UI in debug builds and is printed by the
//! `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::feedback::{FeedbackRequestBody, FeedbackResponse};
use crate::inbound::http::health::HealthStatus;
use crate::inbound::http::responses::MessageResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::surveys::{SurveyRequestBody, SurveyResponse};
use crate::inbound::http::trips_dto::{
    EventPayload, NextEventRequestBody, NextEventResponseBody, StartTripRequestBody,
    StartTripResponseBody, TripEventPayload, TripEventsResponseBody,
};
use crate::inbound::http::users::{LoginRequestBody, SignupRequestBody};

/// Register the session cookie scheme set by `POST /login`.
struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Signed session cookie issued by POST /login. Optional; when present \
                 the body username must match it.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieAddon),
    info(
        title = "TripAdapt API",
        description = "Accounts, travel surveys and adaptive trip itineraries."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::surveys::submit_survey,
        crate::inbound::http::trips::start_trip,
        crate::inbound::http::trips::next_event,
        crate::inbound::http::trips::list_trip_events,
        crate::inbound::http::feedback::submit_feedback,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        MessageResponse,
        SignupRequestBody,
        LoginRequestBody,
        SurveyRequestBody,
        SurveyResponse,
        StartTripRequestBody,
        StartTripResponseBody,
        NextEventRequestBody,
        NextEventResponseBody,
        EventPayload,
        TripEventPayload,
        TripEventsResponseBody,
        FeedbackRequestBody,
        FeedbackResponse,
        HealthStatus,
    )),
    tags(
        (name = "users", description = "Signup and login"),
        (name = "surveys", description = "Travel preference surveys"),
        (name = "trips", description = "Trip creation and event recommendations"),
        (name = "feedback", description = "Free-standing traveller feedback"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
