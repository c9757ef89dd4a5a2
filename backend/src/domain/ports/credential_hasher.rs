//! Driven port wrapping the password-hashing primitive.
//!
//! Hashing is deliberately slow, so the trait is synchronous and callers run
//! it on the blocking pool.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised while hashing a password.
    pub enum CredentialHasherError {
        /// The primitive rejected its inputs or parameters.
        Hash { message: String } => "password hashing failed: {message}",
    }
}

/// Salted, cost-parameterised password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash a password with a fresh salt.
    fn hash(&self, password: &str) -> Result<PasswordHash, CredentialHasherError>;

    /// Check a password against a stored hash.
    ///
    /// Malformed hashes verify as `false`.
    fn verify(&self, hash: &PasswordHash, password: &str) -> bool;
}
