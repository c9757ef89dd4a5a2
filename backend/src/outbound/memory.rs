//! Process-local store implementing every persistence port.
//!
//! Used when no database URL is configured and by HTTP tests. All tables sit
//! behind one mutex so multi-table writes are atomic and event sequencing is
//! serialised per store, mirroring the transactional guarantees of the
//! PostgreSQL adapters.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    FeedbackPersistenceError, FeedbackRepository, SurveyPersistenceError, SurveyRepository,
    TripPersistenceError, TripRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Event, FIRST_EVENT_SEQUENCE, Feedback, NewEvent, Survey, SurveyId, Trip, TripId, UserAccount,
    Username,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Username, UserAccount>,
    surveys: HashMap<SurveyId, Survey>,
    trips: HashMap<TripId, Trip>,
    events: HashMap<TripId, Vec<Event>>,
    feedback: Vec<Feedback>,
}

/// In-memory tables for users, surveys, trips, events and feedback.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

const POISONED: &str = "in-memory store lock poisoned";

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Option<MutexGuard<'_, Tables>> {
        self.tables.lock().ok()
    }

    /// Snapshot of every stored feedback record in insertion order.
    pub fn feedback_records(&self) -> Vec<Feedback> {
        self.lock()
            .map(|tables| tables.feedback.clone())
            .unwrap_or_default()
    }

    /// Snapshot of every stored survey.
    pub fn surveys(&self) -> Vec<Survey> {
        self.lock()
            .map(|tables| tables.surveys.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Total number of stored events across all trips.
    pub fn event_count(&self) -> usize {
        self.lock()
            .map(|tables| tables.events.values().map(Vec::len).sum())
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut tables = self
            .lock()
            .ok_or_else(|| UserPersistenceError::query(POISONED))?;
        if tables.users.contains_key(&account.username) {
            return Err(UserPersistenceError::duplicate_username(
                account.username.as_ref(),
            ));
        }
        tables
            .users
            .insert(account.username.clone(), account.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let tables = self
            .lock()
            .ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(tables.users.get(username).cloned())
    }
}

#[async_trait]
impl SurveyRepository for InMemoryStore {
    async fn save(&self, survey: &Survey) -> Result<(), SurveyPersistenceError> {
        let mut tables = self
            .lock()
            .ok_or_else(|| SurveyPersistenceError::query(POISONED))?;
        tables.surveys.insert(survey.survey_id, survey.clone());
        Ok(())
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryStore {
    async fn save(&self, feedback: &Feedback) -> Result<(), FeedbackPersistenceError> {
        let mut tables = self
            .lock()
            .ok_or_else(|| FeedbackPersistenceError::query(POISONED))?;
        tables.feedback.push(feedback.clone());
        Ok(())
    }
}

#[async_trait]
impl TripRepository for InMemoryStore {
    async fn create_trip(
        &self,
        trip: &Trip,
        first_event: NewEvent,
    ) -> Result<Event, TripPersistenceError> {
        let mut tables = self
            .lock()
            .ok_or_else(|| TripPersistenceError::query(POISONED))?;
        if tables.trips.contains_key(&trip.trip_id) {
            return Err(TripPersistenceError::query(format!(
                "trip {} already exists",
                trip.trip_id
            )));
        }
        let event = first_event.into_event(FIRST_EVENT_SEQUENCE);
        tables.trips.insert(trip.trip_id, trip.clone());
        tables.events.insert(trip.trip_id, vec![event.clone()]);
        Ok(event)
    }

    async fn find_trip(&self, trip_id: &TripId) -> Result<Option<Trip>, TripPersistenceError> {
        let tables = self
            .lock()
            .ok_or_else(|| TripPersistenceError::query(POISONED))?;
        Ok(tables.trips.get(trip_id).cloned())
    }

    async fn latest_event(&self, trip_id: &TripId) -> Result<Option<Event>, TripPersistenceError> {
        let tables = self
            .lock()
            .ok_or_else(|| TripPersistenceError::query(POISONED))?;
        Ok(tables
            .events
            .get(trip_id)
            .and_then(|events| events.iter().max_by_key(|event| event.sequence))
            .cloned())
    }

    async fn append_event(
        &self,
        feedback: &Feedback,
        event: NewEvent,
    ) -> Result<Event, TripPersistenceError> {
        let mut tables = self
            .lock()
            .ok_or_else(|| TripPersistenceError::query(POISONED))?;
        if !tables.trips.contains_key(&event.trip_id) {
            return Err(TripPersistenceError::trip_not_found(event.trip_id.to_string()));
        }
        let trip_id = event.trip_id;
        let events = tables.events.entry(trip_id).or_default();
        let sequence = events
            .iter()
            .map(|stored| stored.sequence)
            .max()
            .map_or(FIRST_EVENT_SEQUENCE, |highest| highest + 1);
        let stored = event.into_event(sequence);
        events.push(stored.clone());
        tables.feedback.push(feedback.clone());
        Ok(stored)
    }

    async fn list_events(&self, trip_id: &TripId) -> Result<Vec<Event>, TripPersistenceError> {
        let tables = self
            .lock()
            .ok_or_else(|| TripPersistenceError::query(POISONED))?;
        let mut events = tables.events.get(trip_id).cloned().unwrap_or_default();
        events.sort_by_key(|event| event.sequence);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{
        EventDetails, EventId, EventSource, FeedbackId, Mood, PasswordHash, TripDuration,
        TripParameters, TripStatus, UserProfile,
    };
    use chrono::Utc;
    use rstest::{fixture, rstest};

    fn username(raw: &str) -> Username {
        Username::new(raw).expect("valid username")
    }

    fn account(name: &str) -> UserAccount {
        UserAccount {
            username: username(name),
            password_hash: PasswordHash::new("$argon2id$hash"),
            profile: UserProfile::default(),
            created_at: Utc::now(),
        }
    }

    fn trip() -> Trip {
        Trip {
            trip_id: TripId::random(),
            username: username("ada"),
            parameters: TripParameters {
                budget: "luxury".to_owned(),
                group_type: "couple".to_owned(),
                group_size: "2".to_owned(),
                duration: TripDuration::new(1).expect("positive"),
                trip_location: "Bath".to_owned(),
                current_location: "Royal Crescent".to_owned(),
                child_friendly: false,
            },
            status: TripStatus::Active,
            created_at: Utc::now(),
        }
    }

    fn pending(trip_id: TripId, name: &str) -> NewEvent {
        NewEvent {
            event_id: EventId::random(),
            trip_id,
            details: EventDetails::new(name, "desc", "loc"),
            source: EventSource::Model,
            created_at: Utc::now(),
        }
    }

    fn feedback(trip_id: TripId) -> Feedback {
        Feedback {
            feedback_id: FeedbackId::random(),
            trip_id: Some(trip_id),
            username: username("ada"),
            mood: Mood::Neutral,
            prev_event_rating: Some("3".to_owned()),
            current_location: "Pump Room".to_owned(),
            prev_state: None,
            created_at: Utc::now(),
        }
    }

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn second_create_with_same_username_conflicts(store: InMemoryStore) {
        store.create(&account("ada")).await.expect("first insert");
        let err = store
            .create(&account("ada"))
            .await
            .expect_err("duplicate insert");
        assert_eq!(err, UserPersistenceError::duplicate_username("ada"));
        assert!(
            store
                .find_by_username(&username("ada"))
                .await
                .expect("lookup")
                .is_some()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn appended_events_follow_highest_sequence(store: InMemoryStore) {
        let trip = trip();
        let first = store
            .create_trip(&trip, pending(trip.trip_id, "one"))
            .await
            .expect("trip created");
        assert_eq!(first.sequence, 1);

        for expected in [2, 3] {
            let event = store
                .append_event(&feedback(trip.trip_id), pending(trip.trip_id, "next"))
                .await
                .expect("event appended");
            assert_eq!(event.sequence, expected);
        }

        let latest = store
            .latest_event(&trip.trip_id)
            .await
            .expect("lookup")
            .expect("event present");
        assert_eq!(latest.sequence, 3);
        assert_eq!(store.feedback_records().len(), 2);
        let listed: Vec<u32> = store
            .list_events(&trip.trip_id)
            .await
            .expect("list")
            .iter()
            .map(|event| event.sequence)
            .collect();
        assert_eq!(listed, vec![1, 2, 3]);
    }

    #[rstest]
    #[tokio::test]
    async fn append_to_unknown_trip_writes_nothing(store: InMemoryStore) {
        let trip_id = TripId::random();
        let err = store
            .append_event(&feedback(trip_id), pending(trip_id, "orphan"))
            .await
            .expect_err("unknown trip");
        assert!(matches!(err, TripPersistenceError::TripNotFound { .. }));
        assert!(store.feedback_records().is_empty());
        assert_eq!(store.event_count(), 0);
    }
}
