//! Trips and the fixed parameters a user chooses when starting one.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{TripId, Username};

/// Lifecycle state of a trip. Trips are created active and never transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripStatus {
    /// Trip is in progress and accepts new events.
    Active,
}

impl TripStatus {
    /// Stored string form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
        }
    }

    /// Parse the stored string form.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Self::Active),
            _ => None,
        }
    }
}

/// Validation failures for trip parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripValidationError {
    /// Duration was not a whole number of days greater than zero.
    InvalidDuration {
        /// Value as received.
        value: String,
    },
}

impl TripValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidDuration { .. } => "duration_of_trip",
        }
    }

    /// Machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDuration { .. } => "invalid_duration",
        }
    }
}

impl fmt::Display for TripValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDuration { value } => write!(
                f,
                "duration_of_trip must be a whole number of days between 1 and {MAX_TRIP_DAYS}, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for TripValidationError {}

/// Longest trip accepted, in days.
pub const MAX_TRIP_DAYS: u32 = 365;

/// Trip length in whole days, between one and [`MAX_TRIP_DAYS`].
///
/// # Examples
/// ```
/// use tripadapt::domain::TripDuration;
///
/// assert_eq!(TripDuration::parse(" 3 ").unwrap().days(), 3);
/// assert!(TripDuration::parse("0").is_err());
/// assert!(TripDuration::parse("3000000000").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripDuration(u32);

impl TripDuration {
    /// Construct from a day count.
    pub fn new(days: u32) -> Result<Self, TripValidationError> {
        if days == 0 || days > MAX_TRIP_DAYS {
            return Err(TripValidationError::InvalidDuration {
                value: days.to_string(),
            });
        }
        Ok(Self(days))
    }

    /// Parse a day count from text such as `"3"`.
    pub fn parse(raw: &str) -> Result<Self, TripValidationError> {
        let trimmed = raw.trim();
        trimmed
            .parse::<u32>()
            .map_err(|_| TripValidationError::InvalidDuration {
                value: trimmed.to_owned(),
            })
            .and_then(Self::new)
    }

    /// Number of days.
    pub const fn days(self) -> u32 {
        self.0
    }
}

/// Parameters fixed for the lifetime of a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripParameters {
    /// Budget tier such as `budget`, `mid-range` or `luxury`.
    pub budget: String,
    /// Group type such as `couple` or `family`.
    pub group_type: String,
    /// Group size as entered (`1`, `3-4`, `9+`).
    pub group_size: String,
    /// Trip length.
    pub duration: TripDuration,
    /// Destination.
    pub trip_location: String,
    /// Where the user is when the trip starts.
    pub current_location: String,
    /// Whether recommendations must suit children.
    pub child_friendly: bool,
}

/// Persisted trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    /// Generated identifier.
    pub trip_id: TripId,
    /// Owning user.
    pub username: Username,
    /// Fixed trip parameters.
    pub parameters: TripParameters,
    /// Lifecycle state.
    pub status: TripStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}
