//! Trip domain service: starting trips, advancing them and reading history.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::account_service::map_user_persistence_error;
use crate::domain::ports::{
    CompletionSource, ListTripEventsRequest, NextEventRequest, StartTripRequest,
    StartTripResponse, TripCommand, TripPersistenceError, TripQuery, TripRepository,
    UserRepository,
};
use crate::domain::recommender::Recommender;
use crate::domain::{
    Error, Event, EventId, Feedback, FeedbackId, NewEvent, PreviousEvent, Recommendation,
    RecommendationContext, Trip, TripId, TripStatus, Username,
};

const TRIP_NOT_FOUND: &str = "Trip not found";

fn map_trip_persistence_error(error: TripPersistenceError) -> Error {
    match error {
        TripPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("trip repository unavailable: {message}"))
        }
        TripPersistenceError::Query { message } => {
            Error::internal(format!("trip repository error: {message}"))
        }
        TripPersistenceError::TripNotFound { .. } => Error::not_found(TRIP_NOT_FOUND),
    }
}

/// Trip service implementing [`TripCommand`] and [`TripQuery`].
pub struct TripService<T: ?Sized, U: ?Sized, C: ?Sized> {
    trips: Arc<T>,
    users: Arc<U>,
    recommender: Recommender<C>,
    clock: Arc<dyn Clock>,
}

impl<T: ?Sized, U: ?Sized, C> TripService<T, U, C>
where
    C: CompletionSource + ?Sized,
{
    /// Create a new service.
    pub fn new(trips: Arc<T>, users: Arc<U>, completions: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            trips,
            users,
            recommender: Recommender::new(completions),
            clock,
        }
    }
}

impl<T, U, C> TripService<T, U, C>
where
    T: TripRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: CompletionSource + ?Sized,
{
    /// Load a trip owned by `owner`. Trips owned by someone else are
    /// reported exactly like missing ones.
    async fn owned_trip(&self, trip_id: &TripId, owner: Option<&Username>) -> Result<Trip, Error> {
        let trip = self
            .trips
            .find_trip(trip_id)
            .await
            .map_err(map_trip_persistence_error)?
            .ok_or_else(|| Error::not_found(TRIP_NOT_FOUND))?;
        match owner {
            Some(owner) if *owner != trip.username => {
                debug!(%trip_id, requester = %owner, "trip owned by another user");
                Err(Error::not_found(TRIP_NOT_FOUND))
            }
            _ => Ok(trip),
        }
    }

    fn pending_event(&self, trip_id: TripId, recommendation: Recommendation) -> NewEvent {
        NewEvent {
            event_id: EventId::random(),
            trip_id,
            details: recommendation.details,
            source: recommendation.source,
            created_at: self.clock.utc(),
        }
    }
}

#[async_trait]
impl<T, U, C> TripCommand for TripService<T, U, C>
where
    T: TripRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: CompletionSource + ?Sized,
{
    async fn start_trip(&self, request: StartTripRequest) -> Result<StartTripResponse, Error> {
        let StartTripRequest {
            username,
            parameters,
        } = request;
        let account = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found("User not found"))?;

        let context = RecommendationContext {
            profile: Some(account.profile),
            current_location: parameters.current_location.clone(),
            parameters: parameters.clone(),
            mood: None,
            previous_event: None,
        };
        let recommendation = self.recommender.recommend(&context).await;

        let trip = Trip {
            trip_id: TripId::random(),
            username,
            parameters,
            status: TripStatus::Active,
            created_at: self.clock.utc(),
        };
        let pending = self.pending_event(trip.trip_id, recommendation);
        let first_event = self
            .trips
            .create_trip(&trip, pending)
            .await
            .map_err(map_trip_persistence_error)?;

        info!(
            trip_id = %trip.trip_id,
            username = %trip.username,
            source = first_event.source.as_str(),
            "trip started"
        );
        Ok(StartTripResponse {
            trip_id: trip.trip_id,
            first_event,
        })
    }

    async fn next_event(&self, request: NextEventRequest) -> Result<Event, Error> {
        let NextEventRequest {
            username,
            trip_id,
            mood,
            current_location,
            prev_event_rating,
        } = request;
        let trip = self.owned_trip(&trip_id, Some(&username)).await?;

        let previous_event = self
            .trips
            .latest_event(&trip_id)
            .await
            .map_err(map_trip_persistence_error)?
            .map(|event| PreviousEvent {
                name: event.details.name,
                rating: prev_event_rating.clone(),
            });
        let profile = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_persistence_error)?
            .map(|account| account.profile);

        let context = RecommendationContext {
            profile,
            parameters: trip.parameters,
            current_location: current_location.clone(),
            mood: Some(mood.clone()),
            previous_event,
        };
        let recommendation = self.recommender.recommend(&context).await;

        let feedback = Feedback {
            feedback_id: FeedbackId::random(),
            trip_id: Some(trip_id),
            username,
            mood,
            prev_event_rating,
            current_location,
            prev_state: None,
            created_at: self.clock.utc(),
        };
        let pending = self.pending_event(trip_id, recommendation);
        let event = self
            .trips
            .append_event(&feedback, pending)
            .await
            .map_err(map_trip_persistence_error)?;

        info!(
            %trip_id,
            sequence = event.sequence,
            source = event.source.as_str(),
            "next event recorded"
        );
        Ok(event)
    }
}

#[async_trait]
impl<T, U, C> TripQuery for TripService<T, U, C>
where
    T: TripRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: CompletionSource + ?Sized,
{
    async fn list_events(&self, request: ListTripEventsRequest) -> Result<Vec<Event>, Error> {
        self.owned_trip(&request.trip_id, request.requester.as_ref())
            .await?;
        self.trips
            .list_events(&request.trip_id)
            .await
            .map_err(map_trip_persistence_error)
    }
}

#[cfg(test)]
#[path = "trip_service_tests.rs"]
mod tests;
