//! Mood and rating feedback used to steer the next recommendation.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{FeedbackId, TripId, Username};

/// Validation failures for feedback values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackValidationError {
    /// Mood was missing or blank.
    EmptyMood,
}

impl FeedbackValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        "mood"
    }

    /// Machine-readable failure code.
    pub fn code(&self) -> &'static str {
        "empty_mood"
    }
}

impl fmt::Display for FeedbackValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMood => write!(f, "mood must not be empty"),
        }
    }
}

impl std::error::Error for FeedbackValidationError {}

/// How the user feels about the trip so far.
///
/// The client offers a fixed set of moods; anything else is kept verbatim.
///
/// # Examples
/// ```
/// use tripadapt::domain::Mood;
///
/// assert_eq!(Mood::parse(" Happy ").unwrap(), Mood::Happy);
/// assert_eq!(Mood::parse("curious").unwrap().as_str(), "curious");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mood {
    Excited,
    Happy,
    Neutral,
    Disappointed,
    Frustrated,
    Inspired,
    Overwhelmed,
    Bored,
    /// Free-text mood outside the known set.
    Other(String),
}

impl Mood {
    /// Parse a mood, matching the known set case-insensitively.
    pub fn parse(raw: &str) -> Result<Self, FeedbackValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FeedbackValidationError::EmptyMood);
        }
        let mood = match trimmed.to_ascii_lowercase().as_str() {
            "excited" => Self::Excited,
            "happy" => Self::Happy,
            "neutral" => Self::Neutral,
            "disappointed" => Self::Disappointed,
            "frustrated" => Self::Frustrated,
            "inspired" => Self::Inspired,
            "overwhelmed" => Self::Overwhelmed,
            "bored" => Self::Bored,
            _ => Self::Other(trimmed.to_owned()),
        };
        Ok(mood)
    }

    /// Stored string form.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Excited => "excited",
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Disappointed => "disappointed",
            Self::Frustrated => "frustrated",
            Self::Inspired => "inspired",
            Self::Overwhelmed => "overwhelmed",
            Self::Bored => "bored",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted feedback record.
///
/// Records written by the next-event flow carry the trip they belong to;
/// free-standing submissions have no trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// Generated identifier.
    pub feedback_id: FeedbackId,
    /// Trip the feedback refers to, if any.
    pub trip_id: Option<TripId>,
    /// Submitting user.
    pub username: Username,
    /// Current mood.
    pub mood: Mood,
    /// Rating of the previous event, stored as text.
    pub prev_event_rating: Option<String>,
    /// Where the user is now.
    pub current_location: String,
    /// Free-text note about the user's previous state.
    pub prev_state: Option<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}
