//! Port for storing survey responses.

use async_trait::async_trait;

use crate::domain::Survey;

use super::define_port_error;

define_port_error! {
    /// Errors raised by survey repository adapters.
    pub enum SurveyPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "survey repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "survey repository query failed: {message}",
    }
}

/// Append-only survey storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// Persist a survey response.
    async fn save(&self, survey: &Survey) -> Result<(), SurveyPersistenceError>;
}
