//! Port for trips and their ordered events.
//!
//! Writes that touch more than one table are single operations on this port
//! so adapters can make them atomic.

use async_trait::async_trait;

use crate::domain::{Event, Feedback, NewEvent, Trip, TripId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by trip repository adapters.
    pub enum TripPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "trip repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "trip repository query failed: {message}",
        /// The referenced trip does not exist.
        TripNotFound { trip_id: String } => "trip not found: {trip_id}",
    }
}

/// Trip and event storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Store a trip together with its first event.
    ///
    /// Either both rows are written or neither is. The returned event carries
    /// [`crate::domain::FIRST_EVENT_SEQUENCE`].
    async fn create_trip(
        &self,
        trip: &Trip,
        first_event: NewEvent,
    ) -> Result<Event, TripPersistenceError>;

    /// Fetch a trip by id.
    async fn find_trip(&self, trip_id: &TripId) -> Result<Option<Trip>, TripPersistenceError>;

    /// Fetch the event with the highest sequence number for a trip.
    async fn latest_event(&self, trip_id: &TripId) -> Result<Option<Event>, TripPersistenceError>;

    /// Store trip-scoped feedback and the next event atomically.
    ///
    /// The event's sequence is one more than the trip's current highest,
    /// computed while concurrent appends to the same trip are excluded.
    /// Fails with [`TripPersistenceError::TripNotFound`] and writes nothing
    /// when the trip is missing.
    async fn append_event(
        &self,
        feedback: &Feedback,
        event: NewEvent,
    ) -> Result<Event, TripPersistenceError>;

    /// List a trip's events in sequence order.
    async fn list_events(&self, trip_id: &TripId) -> Result<Vec<Event>, TripPersistenceError>;
}
