//! Driving port for free-standing feedback submissions.

use async_trait::async_trait;

use crate::domain::{Error, FeedbackId, Mood, Username};

/// Feedback not tied to generating a new event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFeedbackRequest {
    /// Submitting user.
    pub username: Username,
    /// Current mood.
    pub mood: Mood,
    /// Rating of the previous event, as text.
    pub prev_event_rating: String,
    /// Where the user is now.
    pub current_location: String,
    /// Free-text note about the user's previous state.
    pub prev_state: Option<String>,
}

/// Domain use-case port for feedback.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackCommand: Send + Sync {
    /// Store the feedback and return its generated id.
    async fn submit(&self, request: SubmitFeedbackRequest) -> Result<FeedbackId, Error>;
}
