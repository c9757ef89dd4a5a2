//! Account handlers.
//!
//! ```text
//! POST /signup {"username":"alice","password":"pw1","gender":"female","age":"25-34","ethnicity":"white"}
//! POST /login  {"username":"alice","password":"pw1"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Error, LoginCredentials, SignupRequest, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::MessageResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, field_error, missing_field_error, require_text,
};

pub(crate) const SIGNUP_SUCCESS_MESSAGE: &str = "User created successfully";
pub(crate) const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";

/// Signup request body for `POST /signup`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SignupRequestBody {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
    #[schema(example = "female")]
    pub gender: Option<String>,
    #[schema(example = "25-34")]
    pub age: Option<String>,
    #[schema(example = "prefer not to say")]
    pub ethnicity: Option<String>,
}

/// Login request body for `POST /login`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequestBody {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

fn credentials_from(
    username: Option<String>,
    password: Option<String>,
) -> Result<LoginCredentials, Error> {
    let username = username.ok_or_else(|| missing_field_error(FieldName::new("username")))?;
    let password = password.ok_or_else(|| missing_field_error(FieldName::new("password")))?;
    LoginCredentials::try_from_parts(&username, &password).map_err(|err| field_error(&err))
}

impl TryFrom<SignupRequestBody> for SignupRequest {
    type Error = Error;

    fn try_from(body: SignupRequestBody) -> Result<Self, Self::Error> {
        let credentials = credentials_from(body.username, body.password)?;
        let profile = UserProfile {
            gender: require_text(body.gender, FieldName::new("gender"))?,
            age: require_text(body.age, FieldName::new("age"))?,
            ethnicity: require_text(body.ethnicity, FieldName::new("ethnicity"))?,
        };
        Ok(Self {
            credentials,
            profile,
        })
    }
}

impl TryFrom<LoginRequestBody> for LoginCredentials {
    type Error = Error;

    fn try_from(body: LoginRequestBody) -> Result<Self, Self::Error> {
        credentials_from(body.username, body.password)
    }
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequestBody,
    responses(
        (status = 200, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid request or username taken", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = SignupRequest::try_from(payload.into_inner())?;
    state.signup.register(request).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::success(SIGNUP_SUCCESS_MESSAGE)))
}

/// Authenticate and establish a session.
///
/// Unknown usernames are reported before the password is checked.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequestBody,
    responses(
        (status = 200, description = "Login success", body = MessageResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid password", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequestBody>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let username = state.login.authenticate(&credentials).await?;
    session.persist_user(&username)?;
    info!(%username, "session established");
    Ok(HttpResponse::Ok().json(MessageResponse::success(LOGIN_SUCCESS_MESSAGE)))
}

#[cfg(test)]
mod tests;
