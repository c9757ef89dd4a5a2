//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use tripadapt::inbound::http::session_config::SessionSettings;

/// Session cookie, CORS and listener settings for [`super::create_server`].
#[derive(Clone)]
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cors_origins: Vec<String>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            cors_origins: Vec::new(),
        }
    }

    /// Allow credentialed cross-origin requests from `origins`.
    #[must_use]
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Build a configuration from validated session settings.
    #[must_use]
    pub fn from_session(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self::new(session.key, session.cookie_secure, session.same_site, bind_addr)
    }
}
