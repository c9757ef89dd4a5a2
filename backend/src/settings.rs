//! Process settings loaded once at startup via OrthoConfig.
//!
//! Values come from `TRIPADAPT_*` environment variables, matching CLI flags
//! or a config file. Unset values fall back to the defaults below.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_COMPLETION_MAX_TOKENS: u32 = 200;
pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 30;

fn default_bind_addr() -> String {
    String::from(DEFAULT_BIND_ADDR)
}

/// Settings that cannot be turned into usable values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid CORS origin {value:?}: expected scheme://host[:port]")]
    CorsOrigin { value: String },
    #[error("invalid completion endpoint {value:?}: {source}")]
    CompletionEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Application settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRIPADAPT")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    #[ortho_config(default = default_bind_addr())]
    pub bind_addr: String,
    /// PostgreSQL URL. Without one the process keeps data in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Idle connections the pool keeps open.
    pub db_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_connect_timeout_secs: Option<u64>,
    /// Comma-separated origins allowed to call the API with credentials.
    pub cors_origins: Option<String>,
    /// Chat completions endpoint.
    pub completion_endpoint: Option<String>,
    /// Bearer token for the completion endpoint.
    pub completion_api_key: Option<String>,
    /// Model identifier sent with each completion request.
    pub completion_model: Option<String>,
    /// Token budget per completion.
    pub completion_max_tokens: Option<u32>,
    /// Whole-request timeout for completion calls, in seconds.
    pub completion_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_idle", &self.db_min_idle)
            .field("db_connect_timeout_secs", &self.db_connect_timeout_secs)
            .field("cors_origins", &self.cors_origins)
            .field("completion_endpoint", &self.completion_endpoint)
            .field(
                "completion_api_key",
                &self.completion_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("completion_model", &self.completion_model)
            .field("completion_max_tokens", &self.completion_max_tokens)
            .field("completion_timeout_secs", &self.completion_timeout_secs)
            .finish()
    }
}

impl AppSettings {
    /// Parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.trim();
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_deref())
    }

    /// Checkout timeout override for the connection pool.
    pub fn db_connect_timeout(&self) -> Option<Duration> {
        self.db_connect_timeout_secs.map(Duration::from_secs)
    }

    /// Browser origins allowed cross-origin access; empty when unset.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::CorsOrigin`] for wildcards and for values
    /// that are not a bare `scheme://host[:port]` origin.
    pub fn cors_origins(&self) -> Result<Vec<String>, SettingsError> {
        let Some(raw) = non_blank(self.cors_origins.as_deref()) else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(parse_origin)
            .collect()
    }

    /// Parsed completion endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::CompletionEndpoint`] when the value is not a
    /// URL.
    pub fn completion_endpoint(&self) -> Result<Url, SettingsError> {
        let raw = self
            .completion_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_COMPLETION_ENDPOINT);
        Url::parse(raw).map_err(|source| SettingsError::CompletionEndpoint {
            value: raw.to_owned(),
            source,
        })
    }

    /// API key for the completion endpoint, if configured.
    pub fn completion_api_key(&self) -> Option<Zeroizing<String>> {
        non_blank(self.completion_api_key.as_deref()).map(|key| Zeroizing::new(key.to_owned()))
    }

    pub fn completion_model(&self) -> &str {
        non_blank(self.completion_model.as_deref()).unwrap_or(DEFAULT_COMPLETION_MODEL)
    }

    pub fn completion_max_tokens(&self) -> u32 {
        self.completion_max_tokens
            .unwrap_or(DEFAULT_COMPLETION_MAX_TOKENS)
    }

    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(
            self.completion_timeout_secs
                .unwrap_or(DEFAULT_COMPLETION_TIMEOUT_SECS),
        )
    }
}

fn parse_origin(raw: &str) -> Result<String, SettingsError> {
    let invalid = || SettingsError::CorsOrigin {
        value: raw.to_owned(),
    };
    let url = Url::parse(raw).map_err(|_| invalid())?;
    let origin = url.origin();
    if !origin.is_tuple() || url.path() != "/" || raw.ends_with('/') {
        return Err(invalid());
    }
    Ok(origin.ascii_serialization())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
