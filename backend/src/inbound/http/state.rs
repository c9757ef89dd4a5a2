//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    CompletionSource, CredentialHasher, FeedbackCommand, FeedbackRepository, LoginService,
    SignupService, SurveyCommand, SurveyRepository, TripCommand, TripQuery, TripRepository,
    UserRepository,
};
use crate::domain::{AccountService, FeedbackService, SurveyService, TripService};

/// Parameter object bundling the driven adapters the services are built on.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UserRepository>,
    pub surveys: Arc<dyn SurveyRepository>,
    pub feedback: Arc<dyn FeedbackRepository>,
    pub trips: Arc<dyn TripRepository>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub completions: Arc<dyn CompletionSource>,
    pub clock: Arc<dyn Clock>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub surveys: Arc<dyn SurveyCommand>,
    pub feedback: Arc<dyn FeedbackCommand>,
    pub trips: Arc<dyn TripCommand>,
    pub trip_history: Arc<dyn TripQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Build every domain service over the given adapters.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use tripadapt::domain::ports::FixtureCompletionSource;
    /// use tripadapt::inbound::http::state::{HttpState, HttpStatePorts};
    /// use tripadapt::outbound::crypto::Argon2CredentialHasher;
    /// use tripadapt::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::new(HttpStatePorts {
    ///     users: store.clone(),
    ///     surveys: store.clone(),
    ///     feedback: store.clone(),
    ///     trips: store,
    ///     hasher: Arc::new(Argon2CredentialHasher::new()),
    ///     completions: Arc::new(FixtureCompletionSource::default()),
    ///     clock: Arc::new(DefaultClock),
    /// });
    /// let _signup = state.signup.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            surveys,
            feedback,
            trips,
            hasher,
            completions,
            clock,
        } = ports;

        let accounts = Arc::new(AccountService::new(users.clone(), hasher, clock.clone()));
        let trip_service = Arc::new(TripService::new(trips, users, completions, clock.clone()));

        Self {
            signup: accounts.clone(),
            login: accounts,
            surveys: Arc::new(SurveyService::new(surveys, clock.clone())),
            feedback: Arc::new(FeedbackService::new(feedback, clock)),
            trips: trip_service.clone(),
            trip_history: trip_service,
        }
    }
}
