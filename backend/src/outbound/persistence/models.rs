//! Internal Diesel row structs and their domain conversions.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{events, feedback, surveys, trips, users};
use crate::domain::{
    Event, EventDetails, EventId, EventSource, EventStatus, Feedback, NewEvent,
    PasswordHash, Survey, Trip, TripDuration, TripId, TripParameters, TripStatus, UserAccount,
    UserProfile, Username,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub username: String,
    pub password_hash: String,
    pub gender: String,
    pub age: String,
    pub ethnicity: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub gender: &'a str,
    pub age: &'a str,
    pub ethnicity: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a UserAccount> for NewUserRow<'a> {
    fn from(account: &'a UserAccount) -> Self {
        Self {
            username: account.username.as_ref(),
            password_hash: account.password_hash.as_str(),
            gender: &account.profile.gender,
            age: &account.profile.age,
            ethnicity: &account.profile.ethnicity,
            created_at: account.created_at,
        }
    }
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<UserAccount, String> {
        let username = Username::new(&self.username)
            .map_err(|error| format!("invalid username in database: {error}"))?;
        Ok(UserAccount {
            username,
            password_hash: PasswordHash::new(self.password_hash),
            profile: UserProfile {
                gender: self.gender,
                age: self.age,
                ethnicity: self.ethnicity,
            },
            created_at: self.created_at,
        })
    }
}

/// Insertable struct for survey responses.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = surveys)]
pub(crate) struct NewSurveyRow<'a> {
    pub survey_id: Uuid,
    pub username: &'a str,
    pub gender: Option<&'a str>,
    pub age: Option<&'a str>,
    pub ethnicity: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Survey> for NewSurveyRow<'a> {
    fn from(survey: &'a Survey) -> Self {
        Self {
            survey_id: *survey.survey_id.as_uuid(),
            username: survey.username.as_ref(),
            gender: survey.gender.as_deref(),
            age: survey.age.as_deref(),
            ethnicity: survey.ethnicity.as_deref(),
            created_at: survey.created_at,
        }
    }
}

/// Row struct for reading and writing the trips table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = trips)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TripRow {
    pub trip_id: Uuid,
    pub username: String,
    pub budget: String,
    pub group_type: String,
    pub group_size: String,
    pub duration_days: i32,
    pub trip_location: String,
    pub current_location: String,
    pub child_friendly: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TripRow {
    pub(crate) fn from_domain(trip: &Trip) -> Result<Self, String> {
        let parameters = &trip.parameters;
        Ok(Self {
            trip_id: *trip.trip_id.as_uuid(),
            username: trip.username.as_ref().to_owned(),
            budget: parameters.budget.clone(),
            group_type: parameters.group_type.clone(),
            group_size: parameters.group_size.clone(),
            duration_days: i32::try_from(parameters.duration.days())
                .map_err(|_| format!("trip duration out of range: {}", parameters.duration.days()))?,
            trip_location: parameters.trip_location.clone(),
            current_location: parameters.current_location.clone(),
            child_friendly: parameters.child_friendly,
            status: trip.status.as_str().to_owned(),
            created_at: trip.created_at,
        })
    }

    pub(crate) fn into_domain(self) -> Result<Trip, String> {
        let username = Username::new(&self.username)
            .map_err(|error| format!("invalid username in database: {error}"))?;
        let days = u32::try_from(self.duration_days)
            .map_err(|_| format!("negative trip duration in database: {}", self.duration_days))?;
        let duration = TripDuration::new(days).map_err(|error| error.to_string())?;
        let status = TripStatus::parse(&self.status)
            .ok_or_else(|| format!("unknown trip status in database: {}", self.status))?;
        Ok(Trip {
            trip_id: TripId::from_uuid(self.trip_id),
            username,
            parameters: TripParameters {
                budget: self.budget,
                group_type: self.group_type,
                group_size: self.group_size,
                duration,
                trip_location: self.trip_location,
                current_location: self.current_location,
                child_friendly: self.child_friendly,
            },
            status,
            created_at: self.created_at,
        })
    }
}

/// Row struct for reading and writing the events table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventRow {
    pub event_id: Uuid,
    pub trip_id: Uuid,
    pub sequence: i32,
    pub name: String,
    pub description: String,
    pub location: String,
    pub duration: String,
    pub cost: String,
    pub source: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl EventRow {
    pub(crate) fn from_pending(event: &NewEvent, sequence: i32) -> Self {
        let details = &event.details;
        Self {
            event_id: *event.event_id.as_uuid(),
            trip_id: *event.trip_id.as_uuid(),
            sequence,
            name: details.name.clone(),
            description: details.description.clone(),
            location: details.location.clone(),
            duration: details.duration.clone(),
            cost: details.cost.clone(),
            source: event.source.as_str().to_owned(),
            status: EventStatus::Pending.as_str().to_owned(),
            created_at: event.created_at,
        }
    }

    pub(crate) fn into_domain(self) -> Result<Event, String> {
        let sequence = u32::try_from(self.sequence)
            .map_err(|_| format!("negative event sequence in database: {}", self.sequence))?;
        let source = EventSource::parse(&self.source)
            .ok_or_else(|| format!("unknown event source in database: {}", self.source))?;
        let status = EventStatus::parse(&self.status)
            .ok_or_else(|| format!("unknown event status in database: {}", self.status))?;
        Ok(Event {
            event_id: EventId::from_uuid(self.event_id),
            trip_id: TripId::from_uuid(self.trip_id),
            sequence,
            details: EventDetails {
                name: self.name,
                description: self.description,
                location: self.location,
                duration: self.duration,
                cost: self.cost,
            },
            source,
            status,
            created_at: self.created_at,
        })
    }
}

/// Insertable struct for feedback records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = feedback)]
pub(crate) struct NewFeedbackRow<'a> {
    pub feedback_id: Uuid,
    pub trip_id: Option<Uuid>,
    pub username: &'a str,
    pub mood: &'a str,
    pub prev_event_rating: Option<&'a str>,
    pub current_location: &'a str,
    pub prev_state: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Feedback> for NewFeedbackRow<'a> {
    fn from(record: &'a Feedback) -> Self {
        Self {
            feedback_id: *record.feedback_id.as_uuid(),
            trip_id: record.trip_id.map(|trip_id| *trip_id.as_uuid()),
            username: record.username.as_ref(),
            mood: record.mood.as_str(),
            prev_event_rating: record.prev_event_rating.as_deref(),
            current_location: &record.current_location,
            prev_state: record.prev_state.as_deref(),
            created_at: record.created_at,
        }
    }
}
