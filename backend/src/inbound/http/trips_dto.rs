//! Request and response payloads for the trip endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{NextEventRequest, StartTripRequest};
use crate::domain::{Error, Event, Mood, TripDuration, TripId, TripParameters, Username};
use crate::inbound::http::validation::{
    FieldName, FlexibleText, field_error, missing_field_error, optional_flexible, parse_uuid,
    require_flexible, require_text, require_username,
};

/// Request body for `POST /start-trip`.
///
/// `group_size` and `duration_of_trip` accept a JSON number or string.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StartTripRequestBody {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(value_type = Option<String>, example = "mid-range")]
    pub budget: Option<FlexibleText>,
    #[schema(example = "friends")]
    pub type_of_group: Option<String>,
    #[schema(value_type = Option<String>, example = "3-4")]
    pub group_size: Option<FlexibleText>,
    #[schema(value_type = Option<String>, example = "2")]
    pub duration_of_trip: Option<FlexibleText>,
    #[schema(example = "Porto")]
    pub trip_location: Option<String>,
    #[schema(example = "Ribeira")]
    pub current_location: Option<String>,
    pub child_friendly: Option<bool>,
}

impl StartTripRequestBody {
    /// Validate the body into a domain request for `username`.
    pub(crate) fn into_request(
        self,
        acting_user: impl FnOnce(Username) -> Result<Username, Error>,
    ) -> Result<StartTripRequest, Error> {
        let username = acting_user(require_username(self.username)?)?;
        let duration_text =
            require_flexible(self.duration_of_trip, FieldName::new("duration_of_trip"))?;
        let parameters = TripParameters {
            budget: require_flexible(self.budget, FieldName::new("budget"))?,
            group_type: require_text(self.type_of_group, FieldName::new("type_of_group"))?,
            group_size: require_flexible(self.group_size, FieldName::new("group_size"))?,
            duration: TripDuration::parse(&duration_text).map_err(|err| field_error(&err))?,
            trip_location: require_text(self.trip_location, FieldName::new("trip_location"))?,
            current_location: require_text(
                self.current_location,
                FieldName::new("current_location"),
            )?,
            child_friendly: self.child_friendly.unwrap_or(false),
        };
        Ok(StartTripRequest {
            username,
            parameters,
        })
    }
}

/// Request body for `POST /next-event`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NextEventRequestBody {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(format = Uuid)]
    pub trip_id: Option<String>,
    #[schema(example = "happy")]
    pub mood: Option<String>,
    #[schema(example = "Cais da Ribeira")]
    pub current_location: Option<String>,
    /// Rating of the previous event, number or text.
    #[schema(value_type = Option<String>, example = "4")]
    pub prev_event_rating: Option<FlexibleText>,
}

impl NextEventRequestBody {
    pub(crate) fn into_request(
        self,
        acting_user: impl FnOnce(Username) -> Result<Username, Error>,
    ) -> Result<NextEventRequest, Error> {
        let username = acting_user(require_username(self.username)?)?;
        let trip_field = FieldName::new("trip_id");
        let raw_trip = self
            .trip_id
            .ok_or_else(|| missing_field_error(trip_field))?;
        let trip_id = TripId::from_uuid(parse_uuid(&raw_trip, trip_field)?);
        let mood = self
            .mood
            .ok_or_else(|| missing_field_error(FieldName::new("mood")))
            .and_then(|raw| Mood::parse(&raw).map_err(|err| field_error(&err)))?;
        Ok(NextEventRequest {
            username,
            trip_id,
            mood,
            current_location: require_text(
                self.current_location,
                FieldName::new("current_location"),
            )?,
            prev_event_rating: optional_flexible(self.prev_event_rating),
        })
    }
}

/// A recommended activity as returned by `/start-trip` and `/next-event`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EventPayload {
    #[schema(value_type = String, format = Uuid)]
    pub event_id: String,
    #[schema(example = 1)]
    pub sequence: u32,
    #[schema(example = "Riverside food market")]
    pub name: String,
    pub description: String,
    pub location: String,
    #[schema(example = "1-2 hours")]
    pub duration: String,
    #[schema(example = "Varies")]
    pub cost: String,
    /// `model` when the suggestion came from the language model,
    /// `fallback` otherwise.
    #[schema(value_type = String, example = "model")]
    pub source: &'static str,
}

impl From<&Event> for EventPayload {
    fn from(event: &Event) -> Self {
        Self {
            event_id: event.event_id.to_string(),
            sequence: event.sequence,
            name: event.details.name.clone(),
            description: event.details.description.clone(),
            location: event.details.location.clone(),
            duration: event.details.duration.clone(),
            cost: event.details.cost.clone(),
            source: event.source.as_str(),
        }
    }
}

/// An event in a trip's history.
#[derive(Debug, Serialize, ToSchema)]
pub struct TripEventPayload {
    #[serde(flatten)]
    pub event: EventPayload,
    #[schema(value_type = String, example = "pending")]
    pub status: &'static str,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: String,
}

impl From<&Event> for TripEventPayload {
    fn from(event: &Event) -> Self {
        Self {
            event: EventPayload::from(event),
            status: event.status.as_str(),
            created_at: event.created_at.to_rfc3339(),
        }
    }
}

/// Body returned by `POST /start-trip`.
#[derive(Debug, Serialize, ToSchema)]
pub struct StartTripResponseBody {
    #[schema(value_type = String, example = "success")]
    pub status: &'static str,
    #[schema(value_type = String, format = Uuid)]
    pub trip_id: String,
    pub message: String,
    pub next_event: EventPayload,
}

/// Body returned by `POST /next-event`.
#[derive(Debug, Serialize, ToSchema)]
pub struct NextEventResponseBody {
    #[schema(value_type = String, example = "success")]
    pub status: &'static str,
    pub message: String,
    pub next_event: EventPayload,
}

/// Body returned by `GET /trips/{trip_id}/events`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TripEventsResponseBody {
    #[schema(value_type = String, example = "success")]
    pub status: &'static str,
    #[schema(value_type = String, format = Uuid)]
    pub trip_id: String,
    pub events: Vec<TripEventPayload>,
}
