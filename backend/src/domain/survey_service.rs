//! Survey submission service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    SubmitSurveyRequest, SurveyCommand, SurveyPersistenceError, SurveyRepository,
};
use crate::domain::{Error, Survey, SurveyId};

fn map_repository_error(error: SurveyPersistenceError) -> Error {
    match error {
        SurveyPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("survey repository unavailable: {message}"))
        }
        SurveyPersistenceError::Query { message } => {
            Error::internal(format!("survey repository error: {message}"))
        }
    }
}

/// Survey service implementing [`SurveyCommand`].
pub struct SurveyService<R: ?Sized> {
    surveys: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized> SurveyService<R> {
    /// Create a new service over the survey repository.
    pub fn new(surveys: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { surveys, clock }
    }
}

#[async_trait]
impl<R> SurveyCommand for SurveyService<R>
where
    R: SurveyRepository + ?Sized,
{
    async fn submit(&self, request: SubmitSurveyRequest) -> Result<SurveyId, Error> {
        let SubmitSurveyRequest { username, answers } = request;
        let survey = Survey {
            survey_id: SurveyId::random(),
            username,
            gender: answers.gender,
            age: answers.age,
            ethnicity: answers.ethnicity,
            created_at: self.clock.utc(),
        };
        self.surveys
            .save(&survey)
            .await
            .map_err(map_repository_error)?;
        debug!(survey_id = %survey.survey_id, username = %survey.username, "survey stored");
        Ok(survey.survey_id)
    }
}
