use auth::AccessClaims;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;

/// Echo the verified access claims for the bearer of the token.
///
/// The claims come from the request extension populated by the bearer
/// middleware; the roles shown are the ones the token was issued with.
pub async fn me(
    Extension(claims): Extension<AccessClaims>,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&claims).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub id: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl From<&AccessClaims> for MeResponseData {
    fn from(claims: &AccessClaims) -> Self {
        Self {
            id: claims.sub.to_string(),
            email: claims.email.clone(),
            roles: claims.roles.clone(),
        }
    }
}
