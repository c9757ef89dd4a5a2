//! Account domain services: signup and login.
//!
//! Password hashing and verification run on the blocking pool through
//! [`TraceId::spawn_blocking`] so request workers keep serving while Argon2
//! does its work.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tokio::task::JoinError;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    CredentialHasher, CredentialHasherError, LoginService, SignupService, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Error, LoginCredentials, SignupRequest, TraceId, UserAccount, Username};

/// Message returned when a signup reuses a taken username.
pub const USER_EXISTS_MESSAGE: &str = "User already exists";

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => user_exists_error(),
    }
}

fn user_exists_error() -> Error {
    Error::invalid_request(USER_EXISTS_MESSAGE).with_details(json!({
        "field": "username",
        "code": "duplicate_username",
    }))
}

fn map_hasher_error(error: CredentialHasherError) -> Error {
    Error::internal(error.to_string())
}

fn map_join_error(error: JoinError) -> Error {
    Error::internal(format!("password hashing task failed: {error}"))
}

/// Account service implementing the signup and login driving ports.
pub struct AccountService<U: ?Sized, H: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<U: ?Sized, H: ?Sized> AccountService<U, H> {
    /// Create a new service over a user repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository + ?Sized,
    H: CredentialHasher + ?Sized + 'static,
{
    async fn find_account(&self, username: &Username) -> Result<Option<UserAccount>, Error> {
        self.users
            .find_by_username(username)
            .await
            .map_err(map_user_persistence_error)
    }
}

#[async_trait]
impl<U, H> SignupService for AccountService<U, H>
where
    U: UserRepository + ?Sized,
    H: CredentialHasher + ?Sized + 'static,
{
    async fn register(&self, request: SignupRequest) -> Result<Username, Error> {
        let SignupRequest {
            credentials,
            profile,
        } = request;
        let username = credentials.username().clone();

        if self.find_account(&username).await?.is_some() {
            debug!(%username, "signup rejected: username taken");
            return Err(user_exists_error());
        }

        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(credentials.password().to_owned());
        let password_hash = TraceId::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(map_join_error)?
            .map_err(map_hasher_error)?;

        let account = UserAccount {
            username,
            password_hash,
            profile,
            created_at: self.clock.utc(),
        };
        // The repository insert is the authoritative uniqueness check; the
        // lookup above only skips hashing for the common case.
        self.users
            .create(&account)
            .await
            .map_err(map_user_persistence_error)?;

        info!(username = %account.username, "account registered");
        Ok(account.username)
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository + ?Sized,
    H: CredentialHasher + ?Sized + 'static,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Username, Error> {
        let account = self
            .find_account(credentials.username())
            .await?
            .ok_or_else(|| Error::not_found("User not found"))?;

        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(credentials.password().to_owned());
        let stored = account.password_hash.clone();
        let verified = TraceId::spawn_blocking(move || hasher.verify(&stored, &password))
            .await
            .map_err(map_join_error)?;

        if !verified {
            debug!(username = %account.username, "login rejected: password mismatch");
            return Err(Error::unauthorized("Invalid password"));
        }

        info!(username = %account.username, "login succeeded");
        Ok(account.username)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
