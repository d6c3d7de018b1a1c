use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;

pub mod login;
pub mod me;
pub mod refresh;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UsernameTaken(_) | AuthError::EmailTaken(_) => {
                ApiError::Conflict(err.to_string())
            }
            AuthError::InvalidUsername(_) | AuthError::InvalidEmail(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            AuthError::InvalidCredentials | AuthError::InvalidRefresh => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::StoreUnavailable(_) | AuthError::Internal(_) => {
                // Server-side failure: log the cause, return a generic body.
                tracing::error!(error = %err, "Auth operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;
    use crate::domain::auth::errors::EmailError;
    use crate::domain::auth::errors::UsernameError;

    async fn response_parts(err: AuthError) -> (StatusCode, String) {
        let response = ApiError::from(err).into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body: serde_json::Value =
            serde_json::from_slice(&bytes).expect("Response body should be JSON");
        let message = body["data"]["message"]
            .as_str()
            .expect("Error body should carry a message")
            .to_string();
        (status, message)
    }

    #[test]
    fn test_duplicates_map_to_conflict() {
        assert!(matches!(
            ApiError::from(AuthError::UsernameTaken("ana".to_string())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::EmailTaken("ana@x.com".to_string())),
            ApiError::Conflict(_)
        ));
    }

    #[test]
    fn test_validation_maps_to_unprocessable_entity() {
        assert!(matches!(
            ApiError::from(AuthError::InvalidUsername(UsernameError::InvalidCharacters)),
            ApiError::UnprocessableEntity(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::InvalidEmail(EmailError::InvalidFormat(
                "bad".to_string()
            ))),
            ApiError::UnprocessableEntity(_)
        ));
    }

    #[test]
    fn test_rejections_map_to_unauthorized() {
        assert_eq!(
            ApiError::from(AuthError::InvalidCredentials),
            ApiError::Unauthorized("Invalid credentials".to_string())
        );
        assert_eq!(
            ApiError::from(AuthError::InvalidRefresh),
            ApiError::Unauthorized("Invalid refresh token".to_string())
        );
    }

    #[tokio::test]
    async fn test_duplicate_response_names_the_field() {
        let (status, message) =
            response_parts(AuthError::EmailTaken("ana@x.com".to_string())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(message, "Email already registered: ana@x.com");

        let (status, message) = response_parts(AuthError::UsernameTaken("ana".to_string())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(message, "Username already registered: ana");
    }

    #[tokio::test]
    async fn test_validation_response_is_422() {
        let (status, _) = response_parts(AuthError::InvalidUsername(
            UsernameError::InvalidCharacters,
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_rejection_responses_are_401() {
        let (status, message) = response_parts(AuthError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message, "Invalid credentials");

        let (status, message) = response_parts(AuthError::InvalidRefresh).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message, "Invalid refresh token");
    }

    #[tokio::test]
    async fn test_server_side_failures_return_generic_500_body() {
        let (status, message) =
            response_parts(AuthError::StoreUnavailable("pool timed out".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");
        assert!(!message.contains("pool timed out"));

        let (status, message) =
            response_parts(AuthError::Internal("hashing thread panicked".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");
    }
}
