//! Append-only survey responses.

use chrono::{DateTime, Utc};

use super::{SurveyId, Username};

/// Demographic survey answers submitted after signup.
///
/// Every answer is optional; surveys are not linked to a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Survey {
    /// Generated identifier.
    pub survey_id: SurveyId,
    /// Submitting user.
    pub username: Username,
    /// Self-described gender, if answered.
    pub gender: Option<String>,
    /// Age or age range, if answered.
    pub age: Option<String>,
    /// Self-described ethnicity, if answered.
    pub ethnicity: Option<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

/// Survey answers as received from a caller, before an id is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyAnswers {
    /// Self-described gender.
    pub gender: Option<String>,
    /// Age or age range.
    pub age: Option<String>,
    /// Self-described ethnicity.
    pub ethnicity: Option<String>,
}
