//! Short fingerprint of the session signing key.
//!
//! Logged at startup so operators can tell which key a running instance
//! uses without the key material leaving the process.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// Hex-encoded prefix of the SHA-256 digest of the key's signing half.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use tripadapt::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn same_secret_gives_same_fingerprint() {
        let first = key_fingerprint(&Key::derive_from(&[b'a'; 64]));
        let second = key_fingerprint(&Key::derive_from(&[b'a'; 64]));
        assert_eq!(first, second);
        assert_eq!(first.len(), FINGERPRINT_BYTES * 2);
        assert_eq!(first, first.to_lowercase());
    }

    #[rstest]
    fn different_secrets_differ() {
        let first = key_fingerprint(&Key::derive_from(&[b'a'; 64]));
        let second = key_fingerprint(&Key::derive_from(&[b'b'; 64]));
        assert_ne!(first, second);
    }
}
