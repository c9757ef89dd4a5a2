//! TripAdapt entry-point: loads settings, selects adapters and serves the
//! REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, build_ports, create_server, drain_on_signal};
use tripadapt::inbound::http::health::HealthState;
use tripadapt::inbound::http::session_config::fingerprint::key_fingerprint;
use tripadapt::inbound::http::session_config::{BuildMode, session_settings_from_env};
use tripadapt::inbound::http::state::HttpState;
use tripadapt::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|error| std::io::Error::other(format!("failed to load settings: {error}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let cors_origins = settings.cors_origins().map_err(std::io::Error::other)?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        source = ?session.key_source,
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let http_state = HttpState::new(build_ports(&settings).await?);
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        http_state,
        ServerConfig::from_session(session, bind_addr).with_cors_origins(cors_origins),
    )?;
    actix_web::rt::spawn(drain_on_signal(server.handle(), health_state));
    info!(%bind_addr, "listening");
    server.await
}
