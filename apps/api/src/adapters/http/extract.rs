use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use codegate_types::{AccessClaims, bearer_token};

use crate::{adapters::http::app_state::AppState, app_error::AppError};

/// Guard for routes that need a valid access token in the `Authorization`
/// header. Guest requests are counted against the quota.
pub struct AccessIdentity(pub AccessClaims);

impl FromRequestParts<AppState> for AccessIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AppError::MissingToken)?;

        let claims = state.token_validator.authorize_access(token).await?;
        Ok(AccessIdentity(claims))
    }
}
