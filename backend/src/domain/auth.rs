//! Authentication primitives: usernames and login credentials.
//!
//! Inbound adapters hand raw strings to these constructors so every service
//! works with values that already satisfy the account invariants.

use std::fmt;

use zeroize::Zeroizing;

/// Longest username accepted at signup.
pub const USERNAME_MAX_CHARS: usize = 64;

/// Validation failures for usernames and passwords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Username exceeded [`USERNAME_MAX_CHARS`].
    UsernameTooLong,
    /// Username contained control characters.
    UsernameControlCharacter,
    /// Password was blank.
    EmptyPassword,
}

impl CredentialsValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyPassword => "password",
            _ => "username",
        }
    }

    /// Machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "empty_username",
            Self::UsernameTooLong => "username_too_long",
            Self::UsernameControlCharacter => "invalid_username",
            Self::EmptyPassword => "empty_password",
        }
    }
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong => {
                write!(f, "username must be at most {USERNAME_MAX_CHARS} characters")
            }
            Self::UsernameControlCharacter => {
                write!(f, "username must not contain control characters")
            }
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Unique account name; doubles as the users table key.
///
/// ## Invariants
/// - Trimmed, non-empty, at most [`USERNAME_MAX_CHARS`] characters.
/// - Contains no control characters.
///
/// # Examples
/// ```
/// use tripadapt::domain::Username;
///
/// let name = Username::new("  alice ").unwrap();
/// assert_eq!(name.as_ref(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    /// Validate and construct a username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CredentialsValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX_CHARS {
            return Err(CredentialsValidationError::UsernameTooLong);
        }
        if trimmed.chars().any(char::is_control) {
            return Err(CredentialsValidationError::UsernameControlCharacter);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated login credentials used by authentication services.
///
/// The password keeps caller-provided whitespace and is wiped from memory on
/// drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Account name the credentials refer to.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
