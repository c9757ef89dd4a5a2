//! Request-scoped trace identifier for correlating logs and error payloads.
//!
//! The identifier lives in task-local storage. Tokio does not carry
//! task-locals into spawned tasks or blocking threads, so work moved off the
//! request task must go through [`TraceId::scope`] or
//! [`TraceId::spawn_blocking`].

use std::future::Future;

use tokio::task::JoinError;
use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use tripadapt::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "00000000-0000-0000-0000-000000000000".parse().unwrap();
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a new random trace identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Construct a trace identifier from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the current trace identifier if one is in scope.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Execute the provided future with the supplied trace identifier in scope.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }

    /// Run CPU-bound work on the blocking pool, keeping the current trace
    /// identifier visible to it.
    ///
    /// # Errors
    ///
    /// Returns the [`JoinError`] when the blocking task panics or is
    /// cancelled.
    pub async fn spawn_blocking<F, R>(work: F) -> Result<R, JoinError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        match Self::current() {
            Some(id) => tokio::task::spawn_blocking(move || TRACE_ID.sync_scope(id, work)).await,
            None => tokio::task::spawn_blocking(work).await,
        }
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn current_is_none_out_of_scope() {
        assert!(TraceId::current().is_none());
    }

    #[tokio::test]
    async fn current_reflects_scope() {
        let expected = TraceId::generate();
        let observed = TraceId::scope(expected, async { TraceId::current() }).await;
        assert_eq!(observed, Some(expected));
    }

    #[tokio::test]
    async fn spawn_blocking_propagates_scope() {
        let expected = TraceId::generate();
        let observed = TraceId::scope(expected, async {
            TraceId::spawn_blocking(TraceId::current).await
        })
        .await
        .expect("blocking task joins");
        assert_eq!(observed, Some(expected));
    }

    #[tokio::test]
    async fn spawn_blocking_without_scope_sees_none() {
        let observed = TraceId::spawn_blocking(TraceId::current)
            .await
            .expect("blocking task joins");
        assert!(observed.is_none());
    }

    #[test]
    fn parses_and_displays_uuid() {
        let id: TraceId = "00000000-0000-0000-0000-000000000000"
            .parse()
            .expect("valid uuid");
        assert_eq!(id, TraceId::from_uuid(Uuid::nil()));
        assert_eq!(id.to_string(), Uuid::nil().to_string());
    }
}
