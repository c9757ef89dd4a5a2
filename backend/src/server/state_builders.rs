//! Adapter selection for the HTTP state.
//!
//! PostgreSQL repositories are used when a database URL is configured,
//! otherwise a process-local store. The completion source is the HTTP
//! adapter when an API key is configured, otherwise every recommendation
//! uses the fallback event.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{info, warn};

use tripadapt::TraceId;
use tripadapt::domain::ports::{CompletionSource, DisabledCompletionSource};
use tripadapt::inbound::http::state::HttpStatePorts;
use tripadapt::outbound::completion::{CompletionHttpSettings, CompletionHttpSource};
use tripadapt::outbound::crypto::Argon2CredentialHasher;
use tripadapt::outbound::memory::InMemoryStore;
use tripadapt::outbound::persistence::{
    DbPool, DieselFeedbackRepository, DieselSurveyRepository, DieselTripRepository,
    DieselUserRepository, PoolConfig, run_pending_migrations,
};
use tripadapt::settings::AppSettings;

/// Completion adapter settings, or `None` when no API key is configured.
pub(crate) fn completion_settings(
    settings: &AppSettings,
) -> std::io::Result<Option<CompletionHttpSettings>> {
    let Some(api_key) = settings.completion_api_key() else {
        return Ok(None);
    };
    let endpoint = settings
        .completion_endpoint()
        .map_err(std::io::Error::other)?;
    Ok(Some(CompletionHttpSettings {
        endpoint,
        api_key,
        model: settings.completion_model().to_owned(),
        max_tokens: settings.completion_max_tokens(),
        timeout: settings.completion_timeout(),
    }))
}

fn build_completion_source(settings: &AppSettings) -> std::io::Result<Arc<dyn CompletionSource>> {
    match completion_settings(settings)? {
        Some(http_settings) => {
            info!(
                endpoint = %http_settings.endpoint,
                model = %http_settings.model,
                "completion API enabled"
            );
            let source = CompletionHttpSource::new(http_settings).map_err(|error| {
                std::io::Error::other(format!("failed to build completion client: {error}"))
            })?;
            Ok(Arc::new(source))
        }
        None => {
            warn!("no completion API key configured; recommendations use the fallback event");
            Ok(Arc::new(DisabledCompletionSource))
        }
    }
}

/// Pool configuration for `database_url` with any configured overrides.
pub(crate) fn pool_config(settings: &AppSettings, database_url: &str) -> PoolConfig {
    let mut config = PoolConfig::new(database_url);
    if let Some(max_size) = settings.db_max_connections {
        config = config.with_max_size(max_size);
    }
    if let Some(min_idle) = settings.db_min_idle {
        let max_size = config.max_size();
        config = config.with_min_idle(Some(min_idle.min(max_size)));
    }
    if let Some(timeout) = settings.db_connect_timeout() {
        config = config.with_connection_timeout(timeout);
    }
    config
}

async fn database_ports(
    settings: &AppSettings,
    database_url: &str,
    completions: Arc<dyn CompletionSource>,
) -> std::io::Result<HttpStatePorts> {
    let url = database_url.to_owned();
    TraceId::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|error| std::io::Error::other(format!("migration task failed: {error}")))?
        .map_err(std::io::Error::other)?;
    let pool = DbPool::new(pool_config(settings, database_url))
        .await
        .map_err(std::io::Error::other)?;
    info!("using PostgreSQL persistence");
    Ok(HttpStatePorts {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        surveys: Arc::new(DieselSurveyRepository::new(pool.clone())),
        feedback: Arc::new(DieselFeedbackRepository::new(pool.clone())),
        trips: Arc::new(DieselTripRepository::new(pool)),
        hasher: Arc::new(Argon2CredentialHasher::new()),
        completions,
        clock: Arc::new(DefaultClock),
    })
}

/// Ports backed by a process-local store.
pub(crate) fn in_memory_ports(completions: Arc<dyn CompletionSource>) -> HttpStatePorts {
    let store = Arc::new(InMemoryStore::new());
    HttpStatePorts {
        users: store.clone(),
        surveys: store.clone(),
        feedback: store.clone(),
        trips: store,
        hasher: Arc::new(Argon2CredentialHasher::new()),
        completions,
        clock: Arc::new(DefaultClock),
    }
}

/// Select and construct every driven adapter.
///
/// # Errors
///
/// Fails when migrations, the pool or the completion client cannot be set
/// up, or a configured value is malformed.
pub(crate) async fn build_ports(settings: &AppSettings) -> std::io::Result<HttpStatePorts> {
    let completions = build_completion_source(settings)?;
    match settings.database_url() {
        Some(url) => database_ports(settings, url, completions).await,
        None => {
            warn!("no database URL configured; data is kept in memory");
            Ok(in_memory_ports(completions))
        }
    }
}
