//! Driving port for survey submissions.

use async_trait::async_trait;

use crate::domain::{Error, SurveyAnswers, SurveyId, Username};

/// Request to store a survey response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitSurveyRequest {
    /// Submitting user.
    pub username: Username,
    /// Optional demographic answers.
    pub answers: SurveyAnswers,
}

/// Domain use-case port for surveys.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SurveyCommand: Send + Sync {
    /// Store the survey and return its generated id.
    async fn submit(&self, request: SubmitSurveyRequest) -> Result<SurveyId, Error>;
}
