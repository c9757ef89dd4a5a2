//! User accounts and demographic profiles.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{LoginCredentials, Username};

/// Demographic details collected at signup and fed into recommendation
/// prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    /// Self-described gender.
    pub gender: String,
    /// Age or age range, stored as entered (for example `25-34`).
    pub age: String,
    /// Self-described ethnicity.
    pub ethnicity: String,
}

/// Stored password hash in PHC string format.
///
/// `Debug` output is redacted so hashes never reach logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`crate::domain::ports::CredentialHasher`].
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Persisted user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Unique account name.
    pub username: Username,
    /// Hash of the account password.
    pub password_hash: PasswordHash,
    /// Demographic profile captured at signup.
    pub profile: UserProfile,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

/// Validated signup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    /// Username and plaintext password.
    pub credentials: LoginCredentials,
    /// Demographic profile for the new account.
    pub profile: UserProfile,
}
