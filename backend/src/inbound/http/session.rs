//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Login stores the username in the signed session cookie. Later requests
//! still name their user in the body; when a session is present the two must
//! agree.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Username};

pub(crate) const USERNAME_KEY: &str = "username";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated username in the session cookie.
    pub fn persist_user(&self, username: &Username) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USERNAME_KEY, username.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the session's username, if one was stored.
    ///
    /// A value that no longer passes username validation is treated as
    /// absent.
    pub fn username(&self) -> Result<Option<Username>, Error> {
        let raw = self
            .0
            .get::<String>(USERNAME_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| match Username::new(value) {
            Ok(username) => Some(username),
            Err(error) => {
                warn!(%error, "invalid username in session cookie");
                None
            }
        }))
    }

    /// Decide which user a request acts on.
    ///
    /// Without a session the body's username is used as given. With a
    /// session the body must name the same user, otherwise the request is
    /// refused with `403 Forbidden`.
    pub fn acting_user(&self, claimed: Username) -> Result<Username, Error> {
        match self.username()? {
            Some(current) if current != claimed => {
                warn!(session_user = %current, body_user = %claimed, "username mismatch");
                Err(Error::forbidden(
                    "username does not match the logged-in user",
                ))
            }
            _ => Ok(claimed),
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
