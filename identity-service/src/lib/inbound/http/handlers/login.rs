use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginOutcome;
use crate::domain::auth::models::Username;
use crate::domain::auth::ports::AuthPort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // A username that does not even parse gets the same generic rejection
    // as an unknown one; the login surface never explains itself.
    let username =
        Username::new(body.username).map_err(|_| ApiError::from(AuthError::InvalidCredentials))?;

    state
        .auth_service
        .login(LoginCommand::new(username, body.password))
        .await
        .map_err(ApiError::from)
        .map(|ref outcome| ApiSuccess::new(StatusCode::OK, outcome.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub user: LoginUserData,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginUserData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl From<&LoginOutcome> for LoginResponseData {
    fn from(outcome: &LoginOutcome) -> Self {
        Self {
            user: LoginUserData {
                id: outcome.user.id.to_string(),
                username: outcome.user.username.clone(),
                email: outcome.user.email.clone(),
                roles: outcome.user.roles.clone(),
            },
            access_token: outcome.access_token.clone(),
            refresh_token: outcome.refresh_token.clone(),
        }
    }
}
