//! Port for storing free-standing feedback records.

use async_trait::async_trait;

use crate::domain::Feedback;

use super::define_port_error;

define_port_error! {
    /// Errors raised by feedback repository adapters.
    pub enum FeedbackPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "feedback repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "feedback repository query failed: {message}",
    }
}

/// Feedback storage for submissions not tied to event generation.
///
/// Trip-scoped feedback written by the next-event flow goes through
/// [`super::TripRepository::append_event`] so it shares a transaction with
/// the new event.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Persist a feedback record.
    async fn save(&self, feedback: &Feedback) -> Result<(), FeedbackPersistenceError>;
}
