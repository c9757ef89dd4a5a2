//! Port abstraction for user account persistence and its errors.

use async_trait::async_trait;

use crate::domain::{UserAccount, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// An account with this username already exists.
        DuplicateUsername { username: String } => "username already registered: {username}",
    }
}

/// Port for creating and reading user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// Fails with [`UserPersistenceError::DuplicateUsername`] when the
    /// username is taken; the check and the insert are a single atomic step.
    async fn create(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Fetch an account by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;
}
