//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub(crate) use state_builders::build_ports;

use std::sync::Arc;

use actix_cors::Cors;
use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::body::{BoxBody, EitherBody};
use actix_web::http::header;
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use tripadapt::Trace;
use tripadapt::domain::TRACE_ID_HEADER;
#[cfg(debug_assertions)]
use tripadapt::doc::ApiDoc;
use tripadapt::inbound::http::error::{json_error_handler, path_error_handler};
use tripadapt::inbound::http::feedback::submit_feedback;
use tripadapt::inbound::http::health::{HealthState, health, live, ready};
use tripadapt::inbound::http::state::HttpState;
use tripadapt::inbound::http::surveys::submit_survey;
use tripadapt::inbound::http::trips::{list_trip_events, next_event, start_trip};
use tripadapt::inbound::http::users::{login, signup};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Cookie holding the encrypted session.
const SESSION_COOKIE: &str = "session";
const SESSION_TTL_HOURS: i64 = 12;
const CORS_MAX_AGE_SECS: usize = 3600;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
    cors_origins: Arc<[String]>,
}

/// Credentialed CORS for the listed origins; other origins are refused.
fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(["GET", "POST"])
        .allowed_header(header::CONTENT_TYPE)
        .expose_headers([TRACE_ID_HEADER])
        .supports_credentials()
        .max_age(CORS_MAX_AGE_SECS)
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
        cors_origins,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(actix_web::cookie::time::Duration::hours(SESSION_TTL_HOURS)),
        )
        .build();

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(session)
        .wrap(cors(&cors_origins))
        .wrap(Trace)
        .service(signup)
        .service(login)
        .service(submit_survey)
        .service(start_trip)
        .service(next_event)
        .service(submit_feedback)
        .service(list_trip_events)
        .service(health)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the Actix HTTP server and mark the service ready.
///
/// Actix's own signal handling is disabled; pair the server with
/// [`drain_on_signal`] so liveness fails before connections are drained.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        cors_origins,
    } = config;
    let cors_origins: Arc<[String]> = cors_origins.into();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
            cors_origins: cors_origins.clone(),
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Fail liveness, then stop the server gracefully.
pub(crate) async fn drain(handle: ServerHandle, health_state: &HealthState) {
    health_state.mark_unhealthy();
    handle.stop(true).await;
    info!("server drained");
}

async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

/// Wait for SIGINT or SIGTERM, then [`drain`] the server.
pub(crate) async fn drain_on_signal(handle: ServerHandle, health_state: web::Data<HealthState>) {
    match shutdown_signal().await {
        Ok(()) => info!("shutdown signal received"),
        Err(error) => warn!(%error, "failed to listen for shutdown signals; stopping"),
    }
    drain(handle, &health_state).await;
}
