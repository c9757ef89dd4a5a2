//! Trip handlers: start a trip, advance it, and read its history.
//!
//! ```text
//! POST /start-trip {"username":"alice","budget":"mid-range",...}
//! POST /next-event {"username":"alice","trip_id":"...","mood":"happy",...}
//! GET  /trips/{trip_id}/events
//! ```

use actix_web::{HttpResponse, get, post, web};
use tracing::info;

use crate::domain::TripId;
use crate::domain::ports::ListTripEventsRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::SUCCESS;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::trips_dto::{
    EventPayload, NextEventRequestBody, NextEventResponseBody, StartTripRequestBody,
    StartTripResponseBody, TripEventPayload, TripEventsResponseBody,
};
use crate::inbound::http::validation::{FieldName, parse_uuid};

pub(crate) const START_TRIP_MESSAGE: &str = "Trip started successfully";
pub(crate) const NEXT_EVENT_MESSAGE: &str = "Next event generated successfully";

/// Start a trip and recommend its first event.
///
/// Always returns an event; if the language model is unavailable the
/// fallback suggestion is used and `next_event.source` is `fallback`.
#[utoipa::path(
    post,
    path = "/start-trip",
    request_body = StartTripRequestBody,
    responses(
        (status = 200, description = "Trip created", body = StartTripResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Username differs from the session", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "startTrip",
    security([])
)]
#[post("/start-trip")]
pub async fn start_trip(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<StartTripRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = payload
        .into_inner()
        .into_request(|claimed| session.acting_user(claimed))?;
    let started = state.trips.start_trip(request).await?;
    info!(trip_id = %started.trip_id, "trip started");
    Ok(HttpResponse::Ok().json(StartTripResponseBody {
        status: SUCCESS,
        trip_id: started.trip_id.to_string(),
        message: START_TRIP_MESSAGE.to_owned(),
        next_event: EventPayload::from(&started.first_event),
    }))
}

/// Record feedback on the last event and recommend the next one.
#[utoipa::path(
    post,
    path = "/next-event",
    request_body = NextEventRequestBody,
    responses(
        (status = 200, description = "Event created", body = NextEventResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Username differs from the session", body = ErrorSchema),
        (status = 404, description = "Trip not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "nextEvent",
    security([])
)]
#[post("/next-event")]
pub async fn next_event(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NextEventRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = payload
        .into_inner()
        .into_request(|claimed| session.acting_user(claimed))?;
    let event = state.trips.next_event(request).await?;
    Ok(HttpResponse::Ok().json(NextEventResponseBody {
        status: SUCCESS,
        message: NEXT_EVENT_MESSAGE.to_owned(),
        next_event: EventPayload::from(&event),
    }))
}

/// List a trip's events in sequence order.
///
/// With a session only the owner's trips are visible; others read as 404.
#[utoipa::path(
    get,
    path = "/trips/{trip_id}/events",
    params(("trip_id" = String, Path, description = "Trip identifier (UUID)")),
    responses(
        (status = 200, description = "Trip history", body = TripEventsResponseBody),
        (status = 400, description = "Invalid trip id", body = ErrorSchema),
        (status = 404, description = "Trip not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "listTripEvents",
    security([])
)]
#[get("/trips/{trip_id}/events")]
pub async fn list_trip_events(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let trip_id = TripId::from_uuid(parse_uuid(&path.into_inner(), FieldName::new("trip_id"))?);
    let events = state
        .trip_history
        .list_events(ListTripEventsRequest {
            trip_id,
            requester: session.username()?,
        })
        .await?;
    Ok(HttpResponse::Ok().json(TripEventsResponseBody {
        status: SUCCESS,
        trip_id: trip_id.to_string(),
        events: events.iter().map(TripEventPayload::from).collect(),
    }))
}

#[cfg(test)]
#[path = "trips_tests.rs"]
mod tests;
