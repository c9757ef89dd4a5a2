//! PostgreSQL-backed `TripRepository` implementation using Diesel ORM.
//!
//! Multi-row writes run in one transaction. Appending an event locks the
//! trip row first, so `max(sequence) + 1` is computed while concurrent
//! appends to the same trip wait.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{TripPersistenceError, TripRepository};
use crate::domain::{Event, FIRST_EVENT_SEQUENCE, Feedback, NewEvent, Trip, TripId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{EventRow, NewFeedbackRow, TripRow};
use super::pool::{DbPool, PoolError};
use super::schema::{events, feedback, trips};

/// Diesel-backed implementation of the `TripRepository` port.
#[derive(Clone)]
pub struct DieselTripRepository {
    pool: DbPool,
}

impl DieselTripRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TripPersistenceError {
    map_basic_pool_error(error, TripPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TripPersistenceError {
    map_basic_diesel_error(
        error,
        TripPersistenceError::query,
        TripPersistenceError::connection,
    )
}

fn row_to_event(row: EventRow) -> Result<Event, TripPersistenceError> {
    row.into_domain().map_err(TripPersistenceError::query)
}

#[expect(
    clippy::cast_possible_wrap,
    reason = "the first sequence number is a small positive constant"
)]
const FIRST_SEQUENCE: i32 = FIRST_EVENT_SEQUENCE as i32;

fn next_sequence(highest: Option<i32>) -> i32 {
    highest.map_or(FIRST_SEQUENCE, |value| value.saturating_add(1))
}

#[async_trait]
impl TripRepository for DieselTripRepository {
    async fn create_trip(
        &self,
        trip: &Trip,
        first_event: NewEvent,
    ) -> Result<Event, TripPersistenceError> {
        let trip_row = TripRow::from_domain(trip).map_err(TripPersistenceError::query)?;
        let event_row = EventRow::from_pending(&first_event, FIRST_SEQUENCE);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let stored = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(trips::table)
                        .values(&trip_row)
                        .execute(conn)
                        .await?;
                    diesel::insert_into(events::table)
                        .values(&event_row)
                        .execute(conn)
                        .await?;
                    Ok(event_row)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(trip_id = %trip.trip_id, "trip and first event stored");
        row_to_event(stored)
    }

    async fn find_trip(&self, trip_id: &TripId) -> Result<Option<Trip>, TripPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TripRow> = trips::table
            .filter(trips::trip_id.eq(trip_id.as_uuid()))
            .select(TripRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(TripRow::into_domain)
            .transpose()
            .map_err(TripPersistenceError::query)
    }

    async fn latest_event(&self, trip_id: &TripId) -> Result<Option<Event>, TripPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<EventRow> = events::table
            .filter(events::trip_id.eq(trip_id.as_uuid()))
            .order_by(events::sequence.desc())
            .select(EventRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_event).transpose()
    }

    async fn append_event(
        &self,
        record: &Feedback,
        event: NewEvent,
    ) -> Result<Event, TripPersistenceError> {
        let trip_uuid = *event.trip_id.as_uuid();
        let feedback_row = NewFeedbackRow::from(record);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let stored = conn
            .transaction(|conn| {
                async move {
                    let locked: Option<Uuid> = trips::table
                        .filter(trips::trip_id.eq(trip_uuid))
                        .select(trips::trip_id)
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    if locked.is_none() {
                        return Ok(None);
                    }

                    let highest: Option<i32> = events::table
                        .filter(events::trip_id.eq(trip_uuid))
                        .select(diesel::dsl::max(events::sequence))
                        .first(conn)
                        .await?;
                    let event_row = EventRow::from_pending(&event, next_sequence(highest));

                    diesel::insert_into(feedback::table)
                        .values(&feedback_row)
                        .execute(conn)
                        .await?;
                    diesel::insert_into(events::table)
                        .values(&event_row)
                        .execute(conn)
                        .await?;
                    Ok(Some(event_row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let Some(row) = stored else {
            return Err(TripPersistenceError::trip_not_found(trip_uuid.to_string()));
        };
        debug!(trip_id = %trip_uuid, sequence = row.sequence, "event appended");
        row_to_event(row)
    }

    async fn list_events(&self, trip_id: &TripId) -> Result<Vec<Event>, TripPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<EventRow> = events::table
            .filter(events::trip_id.eq(trip_id.as_uuid()))
            .order_by(events::sequence.asc())
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_event).collect()
    }
}
