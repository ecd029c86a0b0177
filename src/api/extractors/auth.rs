use axum::{
    extract::{FromRequestParts, FromRef},
    http::{request::Parts, Method, StatusCode},
};
use crate::state::AppState;
use crate::domain::models::session::Session;
use crate::domain::services::auth_service::AuthService;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::Span;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Reads the session from the access token cookie.
///
/// A missing or invalid token is `Ok(None)`. A valid token on a mutating
/// request without the matching CSRF header is rejected with `403`.
pub fn read_session(parts: &Parts, state: &AppState) -> Result<Option<Session>, StatusCode> {
    let Some(cookies) = parts.extensions.get::<Cookies>() else {
        return Ok(None);
    };

    let Some(access_token) = cookies.get(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string()) else {
        return Ok(None);
    };

    let Ok(claims) = state.auth_service.decode_access_token(&access_token) else {
        return Ok(None);
    };

    let method = &parts.method;
    if method != Method::GET && method != Method::HEAD && method != Method::OPTIONS {
        let csrf_header_val = parts.headers.get(CSRF_HEADER)
            .ok_or(StatusCode::FORBIDDEN)?
            .to_str()
            .map_err(|_| StatusCode::FORBIDDEN)?;

        if csrf_header_val != claims.csrf_token {
            return Err(StatusCode::FORBIDDEN);
        }
    }

    let session = AuthService::session_from_claims(&claims);
    Span::current().record("user_id", session.user_id.as_str());
    Ok(Some(session))
}

/// Requires an authenticated principal; no tenant involved.
pub struct CurrentSession(pub Session);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        read_session(parts, &app_state)?
            .map(CurrentSession)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
