use axum::{
    Form, Json, Router,
    extract::{
        Query, State,
        rejection::{FormRejection, QueryRejection},
    },
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::json;

use crate::{
    adapters::http::{app_state::AppState, extract::AccessIdentity},
    app_error::{AppError, AppResult},
};

pub const REFRESH_COOKIE: &str = "refresh_token";

#[derive(Deserialize)]
struct LoginPayload {
    email: String,
}

#[derive(Deserialize)]
struct VerifyQuery {
    email: String,
    code: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/verify", get(verify))
        .route("/guest", get(guest))
        .route("/refresh", get(refresh))
        .route("/logout", get(logout))
        .route("/protected", get(protected))
}

async fn login(
    State(app_state): State<AppState>,
    payload: Result<Form<LoginPayload>, FormRejection>,
) -> AppResult<impl IntoResponse> {
    let Form(payload) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    app_state.auth_use_cases.request_code(&payload.email).await?;
    Ok(Json(json!({ "message": "Verification code sent successfully" })))
}

/// The refresh token only ever leaves through the cookie.
async fn verify(
    State(app_state): State<AppState>,
    jar: CookieJar,
    query: Result<Query<VerifyQuery>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(query) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let pair = app_state
        .auth_use_cases
        .verify_code(&query.email, &query.code)
        .await?;

    let cookie = refresh_cookie(
        pair.refresh_token,
        app_state.config.refresh_token_ttl,
        app_state.config.cookie_secure,
    );

    Ok((
        jar.add(cookie),
        Json(json!({ "access_token": pair.access_token })),
    ))
}

async fn guest(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let access_token = app_state.auth_use_cases.guest_login().await?;
    Ok(Json(json!({ "access_token": access_token })))
}

async fn refresh(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let Some(cookie) = jar.get(REFRESH_COOKIE) else {
        return Err(AppError::MissingToken);
    };

    let access_token = app_state.auth_use_cases.refresh(cookie.value()).await?;
    Ok(Json(json!({ "access_token": access_token })))
}

/// Client-side logout: already issued access tokens stay valid until they expire.
async fn logout(
    State(app_state): State<AppState>,
    AccessIdentity(claims): AccessIdentity,
    jar: CookieJar,
) -> impl IntoResponse {
    tracing::debug!(identity_id = claims.sub, "Logout");
    let cookie = refresh_cookie(
        String::new(),
        time::Duration::seconds(0),
        app_state.config.cookie_secure,
    );
    (jar.add(cookie), Json(json!({ "status": "success" })))
}

async fn protected(AccessIdentity(_claims): AccessIdentity) -> impl IntoResponse {
    Json(json!({ "status": "success" }))
}

fn refresh_cookie(value: String, max_age: time::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .build()
}
