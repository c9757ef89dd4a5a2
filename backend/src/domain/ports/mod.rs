//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Service`, `*Command`, `*Query`) are called by inbound
//! adapters. Driven ports (`*Repository`, [`CompletionSource`],
//! [`CredentialHasher`]) are implemented by outbound adapters and expose
//! typed errors generated by `define_port_error!`.

mod macros;
pub(crate) use macros::define_port_error;

mod completion_source;
mod credential_hasher;
mod feedback_command;
mod feedback_repository;
mod login_service;
mod signup_service;
mod survey_command;
mod survey_repository;
mod trip_command;
mod trip_query;
mod trip_repository;
mod user_repository;

#[cfg(test)]
pub use completion_source::MockCompletionSource;
pub use completion_source::{
    CompletionRequest, CompletionSource, CompletionSourceError, DisabledCompletionSource,
    FixtureCompletionSource,
};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
#[cfg(test)]
pub use feedback_command::MockFeedbackCommand;
pub use feedback_command::{FeedbackCommand, SubmitFeedbackRequest};
#[cfg(test)]
pub use feedback_repository::MockFeedbackRepository;
pub use feedback_repository::{FeedbackPersistenceError, FeedbackRepository};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use signup_service::MockSignupService;
pub use signup_service::SignupService;
#[cfg(test)]
pub use survey_command::MockSurveyCommand;
pub use survey_command::{SubmitSurveyRequest, SurveyCommand};
#[cfg(test)]
pub use survey_repository::MockSurveyRepository;
pub use survey_repository::{SurveyPersistenceError, SurveyRepository};
#[cfg(test)]
pub use trip_command::MockTripCommand;
pub use trip_command::{NextEventRequest, StartTripRequest, StartTripResponse, TripCommand};
#[cfg(test)]
pub use trip_query::MockTripQuery;
pub use trip_query::{ListTripEventsRequest, TripQuery};
#[cfg(test)]
pub use trip_repository::MockTripRepository;
pub use trip_repository::{TripPersistenceError, TripRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
