//! Driving port for reading trip history.

use async_trait::async_trait;

use crate::domain::{Error, Event, TripId, Username};

/// Request to list a trip's events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTripEventsRequest {
    /// Trip to read.
    pub trip_id: TripId,
    /// Authenticated caller, if any. When present it must own the trip.
    pub requester: Option<Username>,
}

/// Domain use-case port for trip reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripQuery: Send + Sync {
    /// Return the trip's events in sequence order.
    async fn list_events(&self, request: ListTripEventsRequest) -> Result<Vec<Event>, Error>;
}
