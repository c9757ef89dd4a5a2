//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, SignupRequest, Username};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Register a new account and return its username.
    ///
    /// A taken username fails with
    /// [`crate::domain::ErrorCode::InvalidRequest`] and writes nothing.
    async fn register(&self, request: SignupRequest) -> Result<Username, Error>;
}
