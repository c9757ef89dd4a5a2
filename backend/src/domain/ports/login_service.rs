//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing storage or hashing primitive.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Username};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated username.
    ///
    /// Unknown usernames fail with [`crate::domain::ErrorCode::NotFound`]
    /// before the password is checked; a wrong password fails with
    /// [`crate::domain::ErrorCode::Unauthorized`].
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Username, Error>;
}
