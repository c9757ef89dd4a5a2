//! Append-only Diesel repositories for surveys and free-standing feedback.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    FeedbackPersistenceError, FeedbackRepository, SurveyPersistenceError, SurveyRepository,
};
use crate::domain::{Feedback, Survey};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewFeedbackRow, NewSurveyRow};
use super::pool::DbPool;
use super::schema::{feedback, surveys};

/// Diesel-backed implementation of the `SurveyRepository` port.
#[derive(Clone)]
pub struct DieselSurveyRepository {
    pool: DbPool,
}

impl DieselSurveyRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SurveyRepository for DieselSurveyRepository {
    async fn save(&self, survey: &Survey) -> Result<(), SurveyPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_basic_pool_error(error, SurveyPersistenceError::connection))?;
        diesel::insert_into(surveys::table)
            .values(NewSurveyRow::from(survey))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| {
                map_basic_diesel_error(
                    error,
                    SurveyPersistenceError::query,
                    SurveyPersistenceError::connection,
                )
            })
    }
}

/// Diesel-backed implementation of the `FeedbackRepository` port.
#[derive(Clone)]
pub struct DieselFeedbackRepository {
    pool: DbPool,
}

impl DieselFeedbackRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for DieselFeedbackRepository {
    async fn save(&self, record: &Feedback) -> Result<(), FeedbackPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_basic_pool_error(error, FeedbackPersistenceError::connection))?;
        diesel::insert_into(feedback::table)
            .values(NewFeedbackRow::from(record))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| {
                map_basic_diesel_error(
                    error,
                    FeedbackPersistenceError::query,
                    FeedbackPersistenceError::connection,
                )
            })
    }
}
