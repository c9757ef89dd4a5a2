//! Toggle parsing shared by the session settings loader.
//!
//! Debug builds substitute a default and warn; release builds turn the same
//! condition into a [`SessionConfigError`].

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n|on|off";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Configuration for parsing a boolean environment variable.
pub(super) struct BoolEnvConfig {
    name: &'static str,
    default_value: bool,
}

impl BoolEnvConfig {
    pub(super) const fn new(name: &'static str, default_value: bool) -> Self {
        Self {
            name,
            default_value,
        }
    }
}

pub(super) fn parse_bool_env<E: Env, F>(
    env: &E,
    mode: BuildMode,
    config: BoolEnvConfig,
    value_validator: F,
) -> Result<bool, SessionConfigError>
where
    F: FnOnce(bool, BuildMode) -> Result<bool, SessionConfigError>,
{
    let default_label = if config.default_value {
        "enabled"
    } else {
        "disabled"
    };
    match env.string(config.name) {
        Some(value) => match parse_bool(&value) {
            Some(flag) => value_validator(flag, mode),
            None => {
                debug_warn_or_error(
                    mode,
                    config.default_value,
                    SessionConfigError::InvalidEnv {
                        name: config.name,
                        value: value.clone(),
                        expected: BOOL_EXPECTED,
                    },
                    || {
                        warn!(
                            value = %value,
                            "invalid {}; defaulting to {}",
                            config.name,
                            default_label
                        );
                    },
                )
            }
        },
        None => debug_warn_or_error(
            mode,
            config.default_value,
            SessionConfigError::MissingEnv { name: config.name },
            || warn!("{} not set; defaulting to {}", config.name, default_label),
        ),
    }
}

pub(super) fn debug_warn_or_error<T, F>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn_fn: F,
) -> Result<T, SessionConfigError>
where
    F: FnOnce(),
{
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

pub(super) fn parse_same_site_value(
    value: String,
    mode: BuildMode,
    cookie_secure: bool,
    default_same_site: SameSite,
) -> Result<SameSite, SessionConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" => {
            validate_same_site_none(mode, cookie_secure)?;
            Ok(SameSite::None)
        }
        _ => debug_warn_or_error(
            mode,
            default_same_site,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.clone(),
                expected: SAMESITE_EXPECTED,
            },
            || warn!(value = %value, "invalid SESSION_SAMESITE, using default"),
        ),
    }
}

fn validate_same_site_none(mode: BuildMode, cookie_secure: bool) -> Result<(), SessionConfigError> {
    if cookie_secure {
        return Ok(());
    }

    debug_warn_or_error(mode, (), SessionConfigError::InsecureSameSiteNone, || {
        warn!(
            "{}",
            concat!(
                "SESSION_SAMESITE=None with SESSION_COOKIE_SECURE=0; ",
                "browsers may reject third-party cookies"
            )
        );
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for toggle parsing.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Some(true))]
    #[case(" Yes ", Some(true))]
    #[case("on", Some(true))]
    #[case("FALSE", Some(false))]
    #[case("off", Some(false))]
    #[case("maybe", None)]
    #[case("", None)]
    fn parses_boolean_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool(raw), expected);
    }

    #[rstest]
    #[case(BuildMode::Debug, true)]
    #[case(BuildMode::Release, false)]
    fn missing_value_depends_on_mode(#[case] mode: BuildMode, #[case] tolerated: bool) {
        let result = debug_warn_or_error(
            mode,
            7,
            SessionConfigError::MissingEnv { name: "X" },
            || {},
        );
        assert_eq!(result.is_ok(), tolerated);
    }

    #[rstest]
    fn same_site_none_needs_secure_cookie_in_release() {
        let err = parse_same_site_value("None".to_owned(), BuildMode::Release, false, SameSite::Strict)
            .expect_err("insecure None is rejected");
        assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));

        let same_site =
            parse_same_site_value("none".to_owned(), BuildMode::Release, true, SameSite::Strict)
                .expect("secure None is accepted");
        assert_eq!(same_site, SameSite::None);
    }
}
