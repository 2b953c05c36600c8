//! Session endpoints and the request-side half of the session gate.
//!
//! Tokens come from `Authorization: Bearer <token>` first, then from the session
//! cookie. Raw tokens stay wrapped in [`SecretString`] until handed to the gate.

use axum::{
    Json,
    extract::Extension,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{AUTHORIZATION, COOKIE, InvalidHeaderValue, SET_COOKIE},
    },
    response::{IntoResponse, Response},
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::error;

use super::types::SessionResponse;
use crate::{
    api::state::{ShopConfig, ShopState},
    session::{AuthError, Identity, Role},
};

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED.into_response(),
            Self::Forbidden => StatusCode::FORBIDDEN.into_response(),
            Self::VerificationFailure => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

/// Resolve the caller's session, enforcing `required_role` when given.
pub(crate) async fn require_identity(
    headers: &HeaderMap,
    state: &ShopState,
    required_role: Option<Role>,
) -> Result<Identity, AuthError> {
    let token = extract_session_token(headers, state.config().session_cookie_name());
    state
        .gate()
        .authorize(token.as_ref().map(|token| token.expose_secret()), required_role)
        .await
}

#[utoipa::path(
    get,
    path = "/v1/auth/session",
    responses(
        (status = 200, description = "Session is active", body = SessionResponse),
        (status = 204, description = "No active session"),
        (status = 500, description = "Session verification unavailable")
    ),
    tag = "auth"
)]
pub async fn session(headers: HeaderMap, state: Extension<Arc<ShopState>>) -> impl IntoResponse {
    // Missing or stale sessions are not an error when checking the session.
    match require_identity(&headers, &state, None).await {
        Ok(identity) => (StatusCode::OK, Json(SessionResponse::from(identity))).into_response(),
        Err(AuthError::Unauthenticated | AuthError::Forbidden) => {
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tag = "auth"
)]
pub async fn logout(headers: HeaderMap, state: Extension<Arc<ShopState>>) -> impl IntoResponse {
    let config = state.config();
    if let Some(token) = extract_session_token(&headers, config.session_cookie_name())
        && let Err(err) = state.gate().revoke(token.expose_secret()).await
    {
        error!("Failed to revoke session: {err:#}");
    }

    // Always clear the cookie, even if the session was already gone.
    let mut response_headers = HeaderMap::new();
    match clear_session_cookie(config) {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build session cookie header: {err}"),
    }
    (StatusCode::NO_CONTENT, response_headers).into_response()
}

fn clear_session_cookie(config: &ShopConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        config.session_cookie_name()
    );
    if config.session_cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Pull the raw session token off the request, bearer header first.
pub(crate) fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<SecretString> {
    extract_bearer_token(headers)
        .or_else(|| extract_cookie_token(headers, cookie_name))
        .map(SecretString::from)
}

fn extract_cookie_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let value = headers.get(COOKIE)?.to_str().ok()?;
    value
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == cookie_name)
        .map(|(_, val)| val.trim())
        .filter(|val| !val.is_empty())
        .map(str::to_string)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
