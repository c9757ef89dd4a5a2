//! Driving ports for starting trips and advancing them event by event.

use async_trait::async_trait;

use crate::domain::{Error, Event, Mood, TripId, TripParameters, Username};

/// Request to start a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTripRequest {
    /// Trip owner.
    pub username: Username,
    /// Fixed trip parameters.
    pub parameters: TripParameters,
}

/// A started trip and its first recommended event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTripResponse {
    /// Generated trip id.
    pub trip_id: TripId,
    /// First event, sequence 1.
    pub first_event: Event,
}

/// Request for the next event of a trip, carrying feedback on the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextEventRequest {
    /// Requesting user; must own the trip.
    pub username: Username,
    /// Trip to advance.
    pub trip_id: TripId,
    /// Current mood.
    pub mood: Mood,
    /// Where the user is now.
    pub current_location: String,
    /// Rating of the previous event, as text.
    pub prev_event_rating: Option<String>,
}

/// Domain use-case port for trip progression.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripCommand: Send + Sync {
    /// Create a trip and its first event.
    ///
    /// Always yields an event: recommendation failures fall back to a
    /// default activity instead of failing the request.
    async fn start_trip(&self, request: StartTripRequest) -> Result<StartTripResponse, Error>;

    /// Record feedback and generate the trip's next event.
    ///
    /// Unknown trips, and trips owned by another user, fail with
    /// [`crate::domain::ErrorCode::NotFound`] without writing anything.
    async fn next_event(&self, request: NextEventRequest) -> Result<Event, Error>;
}
