//! Free-standing feedback submissions.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    FeedbackCommand, FeedbackPersistenceError, FeedbackRepository, SubmitFeedbackRequest,
};
use crate::domain::{Error, Feedback, FeedbackId};

fn map_repository_error(error: FeedbackPersistenceError) -> Error {
    match error {
        FeedbackPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("feedback repository unavailable: {message}"))
        }
        FeedbackPersistenceError::Query { message } => {
            Error::internal(format!("feedback repository error: {message}"))
        }
    }
}

/// Feedback service implementing [`FeedbackCommand`].
///
/// Records written here carry no trip; trip-scoped feedback is stored by the
/// next-event flow together with the event it produced.
pub struct FeedbackService<R: ?Sized> {
    feedback: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized> FeedbackService<R> {
    /// Create a new service over the feedback repository.
    pub fn new(feedback: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { feedback, clock }
    }
}

#[async_trait]
impl<R> FeedbackCommand for FeedbackService<R>
where
    R: FeedbackRepository + ?Sized,
{
    async fn submit(&self, request: SubmitFeedbackRequest) -> Result<FeedbackId, Error> {
        let record = Feedback {
            feedback_id: FeedbackId::random(),
            trip_id: None,
            username: request.username,
            mood: request.mood,
            prev_event_rating: Some(request.prev_event_rating),
            current_location: request.current_location,
            prev_state: request.prev_state,
            created_at: self.clock.utc(),
        };
        self.feedback
            .save(&record)
            .await
            .map_err(map_repository_error)?;
        debug!(feedback_id = %record.feedback_id, mood = %record.mood, "feedback stored");
        Ok(record.feedback_id)
    }
}
