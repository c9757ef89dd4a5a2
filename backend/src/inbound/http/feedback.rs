//! Free-standing feedback handler.
//!
//! `/next-event` records feedback tied to a trip; this endpoint stores
//! feedback without one.
//!
//! ```text
//! POST /feedback {"username":"alice","mood":"happy","how_was_prev_event":"5","current_loc":"Porto"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::SubmitFeedbackRequest;
use crate::domain::{Error, Mood};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::SUCCESS;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, FlexibleText, field_error, missing_field_error, optional_text, require_flexible,
    require_text, require_username,
};

pub(crate) const FEEDBACK_SUCCESS_MESSAGE: &str = "Feedback submitted successfully";

/// Request body for `POST /feedback`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct FeedbackRequestBody {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "happy")]
    pub mood: Option<String>,
    /// Rating of the previous event, number or text.
    #[schema(value_type = Option<String>, example = "5")]
    pub how_was_prev_event: Option<FlexibleText>,
    #[schema(example = "Porto")]
    pub current_loc: Option<String>,
    pub prev_state: Option<String>,
}

/// Body returned after feedback is stored.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackResponse {
    #[schema(value_type = String, example = "success")]
    pub status: &'static str,
    #[schema(value_type = String, format = Uuid)]
    pub feedback_id: String,
    pub message: String,
}

impl FeedbackRequestBody {
    fn into_request(self, session: &SessionContext) -> Result<SubmitFeedbackRequest, Error> {
        let username = session.acting_user(require_username(self.username)?)?;
        let mood = self
            .mood
            .ok_or_else(|| missing_field_error(FieldName::new("mood")))
            .and_then(|raw| Mood::parse(&raw).map_err(|err| field_error(&err)))?;
        Ok(SubmitFeedbackRequest {
            username,
            mood,
            prev_event_rating: require_flexible(
                self.how_was_prev_event,
                FieldName::new("how_was_prev_event"),
            )?,
            current_location: require_text(self.current_loc, FieldName::new("current_loc"))?,
            prev_state: optional_text(self.prev_state),
        })
    }
}

/// Store feedback that is not tied to a trip.
#[utoipa::path(
    post,
    path = "/feedback",
    request_body = FeedbackRequestBody,
    responses(
        (status = 200, description = "Feedback stored", body = FeedbackResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Username differs from the session", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["feedback"],
    operation_id = "submitFeedback",
    security([])
)]
#[post("/feedback")]
pub async fn submit_feedback(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FeedbackRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner().into_request(&session)?;
    let feedback_id = state.feedback.submit(request).await?;
    Ok(HttpResponse::Ok().json(FeedbackResponse {
        status: SUCCESS,
        feedback_id: feedback_id.to_string(),
        message: FEEDBACK_SUCCESS_MESSAGE.to_owned(),
    }))
}
