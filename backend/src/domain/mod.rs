//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence adapters and the services that orchestrate them. Types here
//! know nothing about HTTP, SQL or the completion API; adapters reach them
//! through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Username, LoginCredentials, UserAccount: account identity.
//! - Trip, Event, Feedback, Survey: persisted records.
//! - render_prompt / parse_reply: the recommendation text contract.
//! - AccountService, TripService, SurveyService, FeedbackService: driving
//!   port implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod event;
pub mod feedback;
pub mod feedback_service;
pub mod ids;
pub mod ports;
pub mod recommendation;
pub mod recommender;
pub mod survey;
pub mod survey_service;
pub mod trace_id;
pub mod trip;
pub mod trip_service;
pub mod user;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::account_service::{AccountService, USER_EXISTS_MESSAGE};
pub use self::auth::{CredentialsValidationError, LoginCredentials, USERNAME_MAX_CHARS, Username};
pub use self::error::{Error, ErrorCode};
pub use self::event::{
    DEFAULT_EVENT_COST, DEFAULT_EVENT_DURATION, Event, EventDetails, EventSource, EventStatus,
    FIRST_EVENT_SEQUENCE, NewEvent,
};
pub use self::feedback::{Feedback, FeedbackValidationError, Mood};
pub use self::feedback_service::FeedbackService;
pub use self::ids::{EventId, FeedbackId, SurveyId, TripId};
pub use self::recommendation::{
    FALLBACK_EVENT_DESCRIPTION, FALLBACK_EVENT_LOCATION, FALLBACK_EVENT_NAME, NOT_SPECIFIED,
    ParsedReply, PreviousEvent, Recommendation, RecommendationContext, fallback_event,
    parse_reply, render_prompt,
};
pub use self::recommender::Recommender;
pub use self::survey::{Survey, SurveyAnswers};
pub use self::survey_service::SurveyService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::trip::{
    MAX_TRIP_DAYS, Trip, TripDuration, TripParameters, TripStatus, TripValidationError,
};
pub use self::trip_service::TripService;
pub use self::user::{PasswordHash, SignupRequest, UserAccount, UserProfile};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use tripadapt::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("session user does not match request"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
