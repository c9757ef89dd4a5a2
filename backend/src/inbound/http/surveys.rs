//! Survey handler.
//!
//! ```text
//! POST /user-survey {"username":"alice","gender":"female","age":"25-34"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::SurveyAnswers;
use crate::domain::ports::SubmitSurveyRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::SUCCESS;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{optional_text, require_username};

pub(crate) const SURVEY_SUCCESS_MESSAGE: &str = "Survey submitted successfully";

/// Request body for `POST /user-survey`. Demographic answers are optional.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SurveyRequestBody {
    #[schema(example = "alice")]
    pub username: Option<String>,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub ethnicity: Option<String>,
}

/// Body returned after a survey is stored.
#[derive(Debug, Serialize, ToSchema)]
pub struct SurveyResponse {
    #[schema(value_type = String, example = "success")]
    pub status: &'static str,
    pub message: String,
    #[schema(value_type = String, format = Uuid)]
    pub survey_id: String,
}

/// Store a survey response.
#[utoipa::path(
    post,
    path = "/user-survey",
    request_body = SurveyRequestBody,
    responses(
        (status = 200, description = "Survey stored", body = SurveyResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Username differs from the session", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["surveys"],
    operation_id = "submitSurvey",
    security([])
)]
#[post("/user-survey")]
pub async fn submit_survey(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SurveyRequestBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let username = session.acting_user(require_username(body.username)?)?;
    let request = SubmitSurveyRequest {
        username,
        answers: SurveyAnswers {
            gender: optional_text(body.gender),
            age: optional_text(body.age),
            ethnicity: optional_text(body.ethnicity),
        },
    };
    let survey_id = state.surveys.submit(request).await?;
    Ok(HttpResponse::Ok().json(SurveyResponse {
        status: SUCCESS,
        message: SURVEY_SUCCESS_MESSAGE.to_owned(),
        survey_id: survey_id.to_string(),
    }))
}
