//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::ports::{CompletionSource, FixtureCompletionSource};
use crate::domain::test_fixtures::fixture_clock;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::crypto::Argon2CredentialHasher;
use crate::outbound::memory::InMemoryStore;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state over a fresh in-memory store and the given model stub.
pub fn in_memory_state_with(
    completions: Arc<dyn CompletionSource>,
) -> (HttpState, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let state = HttpState::new(HttpStatePorts {
        users: store.clone(),
        surveys: store.clone(),
        feedback: store.clone(),
        trips: store.clone(),
        hasher: Arc::new(Argon2CredentialHasher::new()),
        completions,
        clock: fixture_clock(),
    });
    (state, store)
}

/// Handler state over a fresh in-memory store and a well-formed model reply.
pub fn in_memory_state() -> (HttpState, Arc<InMemoryStore>) {
    in_memory_state_with(Arc::new(FixtureCompletionSource::default()))
}

/// Extract the session cookie set by a response.
pub fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
