//! Argon2id implementation of the `CredentialHasher` port.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash as PhcHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::warn;

use crate::domain::PasswordHash;
use crate::domain::ports::{CredentialHasher, CredentialHasherError};

/// Password hasher using Argon2id with the crate's default cost parameters.
///
/// Hashes are stored in PHC string format, so parameters travel with each
/// hash and can be raised later without invalidating existing accounts.
#[derive(Default, Clone)]
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
}

impl Argon2CredentialHasher {
    /// Create a hasher with default Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, CredentialHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordHash::new(hash.to_string()))
            .map_err(|error| CredentialHasherError::hash(error.to_string()))
    }

    fn verify(&self, hash: &PasswordHash, password: &str) -> bool {
        let parsed = match PhcHash::new(hash.as_str()) {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(%error, "stored password hash is malformed");
                return false;
            }
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2CredentialHasher {
        Argon2CredentialHasher::new()
    }

    #[rstest]
    fn verifies_the_hashed_password(hasher: Argon2CredentialHasher) {
        let hash = hasher.hash("correct horse").expect("hash succeeds");
        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify(&hash, "correct horse"));
    }

    #[rstest]
    fn rejects_a_different_password(hasher: Argon2CredentialHasher) {
        let hash = hasher.hash("correct horse").expect("hash succeeds");
        assert!(!hasher.verify(&hash, "battery staple"));
    }

    #[rstest]
    fn salts_each_hash(hasher: Argon2CredentialHasher) {
        let first = hasher.hash("same").expect("hash succeeds");
        let second = hasher.hash("same").expect("hash succeeds");
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("")]
    #[case("not-a-phc-string")]
    #[case("$2b$12$legacybcrypthashvalue")]
    fn malformed_hashes_do_not_verify(hasher: Argon2CredentialHasher, #[case] stored: &str) {
        assert!(!hasher.verify(&PasswordHash::new(stored), "anything"));
    }

    #[rstest]
    fn hashes_whitespace_and_empty_passwords(hasher: Argon2CredentialHasher) {
        let hash = hasher.hash("  padded  ").expect("hash succeeds");
        assert!(hasher.verify(&hash, "  padded  "));
        assert!(!hasher.verify(&hash, "padded"));
    }
}
