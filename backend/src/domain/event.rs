//! Recommended events and their position within a trip.

use chrono::{DateTime, Utc};

use super::{EventId, TripId};

/// Duration reported for every event; the model is not asked for one.
pub const DEFAULT_EVENT_DURATION: &str = "1-2 hours";
/// Cost reported for every event; the model is not asked for one.
pub const DEFAULT_EVENT_COST: &str = "Varies";
/// Sequence number of the event created alongside a trip.
pub const FIRST_EVENT_SEQUENCE: u32 = 1;

/// Human-facing description of a recommended activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    /// Activity name.
    pub name: String,
    /// One or two sentence description.
    pub description: String,
    /// Where the activity takes place.
    pub location: String,
    /// Expected duration.
    pub duration: String,
    /// Expected cost.
    pub cost: String,
}

impl EventDetails {
    /// Build details from the three model-supplied fields, filling the
    /// remaining ones with defaults.
    ///
    /// # Examples
    /// ```
    /// use tripadapt::domain::{EventDetails, DEFAULT_EVENT_COST};
    ///
    /// let details = EventDetails::new("Harbour walk", "Stroll the quay.", "Old Port");
    /// assert_eq!(details.cost, DEFAULT_EVENT_COST);
    /// ```
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            location: location.into(),
            duration: DEFAULT_EVENT_DURATION.to_owned(),
            cost: DEFAULT_EVENT_COST.to_owned(),
        }
    }
}

/// Which path produced an event's details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    /// Parsed from a completion reply.
    Model,
    /// Substituted because the reply was unavailable or unusable.
    Fallback,
}

impl EventSource {
    /// Stored and serialised string form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Fallback => "fallback",
        }
    }

    /// Parse the stored string form.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "model" => Some(Self::Model),
            "fallback" => Some(Self::Fallback),
            _ => None,
        }
    }
}

/// Lifecycle state of an event. Events are stored pending and never
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// Suggested to the user, not yet rated.
    Pending,
}

impl EventStatus {
    /// Stored string form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
        }
    }

    /// Parse the stored string form.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// Event awaiting persistence. The store assigns its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    /// Generated identifier.
    pub event_id: EventId,
    /// Owning trip.
    pub trip_id: TripId,
    /// Recommended activity.
    pub details: EventDetails,
    /// Model or fallback.
    pub source: EventSource,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl NewEvent {
    /// Attach the store-assigned sequence number.
    pub fn into_event(self, sequence: u32) -> Event {
        Event {
            event_id: self.event_id,
            trip_id: self.trip_id,
            sequence,
            details: self.details,
            source: self.source,
            status: EventStatus::Pending,
            created_at: self.created_at,
        }
    }
}

/// Persisted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Generated identifier.
    pub event_id: EventId,
    /// Owning trip.
    pub trip_id: TripId,
    /// Position within the trip, starting at [`FIRST_EVENT_SEQUENCE`].
    pub sequence: u32,
    /// Recommended activity.
    pub details: EventDetails,
    /// Model or fallback.
    pub source: EventSource,
    /// Lifecycle state.
    pub status: EventStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}
