use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{ChangePasswordRequest, LoginRequest};
use crate::api::extractors::auth::{CurrentSession, ACCESS_TOKEN_COOKIE};
use crate::domain::models::{auth::{AuthResponse, UserProfile}, user::User};
use crate::domain::services::auth_service::{hash_password, verify_password};
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use tracing::{info, warn};

const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_email(&User::normalize_email(&payload.email)).await?
        .ok_or(AppError::Unauthorized)?;

    verify_password(&payload.password, &user.password_hash)?;

    let (access_jwt, refresh_token, csrf_token) = state.auth_service.login(&user).await?;

    set_cookies(&cookies, &access_jwt, &refresh_token);

    info!("User logged in: {}", user.id);

    Ok(Json(AuthResponse {
        csrf_token,
        user: profile(user),
    }))
}

pub async fn refresh(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<impl IntoResponse, AppError> {
    let refresh_cookie = cookies.get(REFRESH_TOKEN_COOKIE).ok_or(AppError::Unauthorized)?;

    let record = state.auth_service.find_refresh_record(refresh_cookie.value()).await?
        .ok_or(AppError::Unauthorized)?;

    let user = state.user_repo.find_by_id(&record.user_id).await?
        .ok_or(AppError::Unauthorized)?;

    let (new_access, new_refresh, new_csrf) = state.auth_service.refresh(record, &user).await?;

    set_cookies(&cookies, &new_access, &new_refresh);

    info!("Token refreshed for user: {}", user.id);

    Ok(Json(AuthResponse {
        csrf_token: new_csrf,
        user: profile(user),
    }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<impl IntoResponse, AppError> {
    if let Some(cookie) = cookies.get(REFRESH_TOKEN_COOKIE) {
        let _ = state.auth_service.logout(cookie.value()).await;
    }

    cookies.remove(Cookie::build((ACCESS_TOKEN_COOKIE, "")).path("/").into());
    cookies.remove(Cookie::build((REFRESH_TOKEN_COOKIE, "")).path("/").into());

    info!("User logged out");

    Ok(StatusCode::OK)
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_id(&session.user_id).await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(profile(user)))
}

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_id(&session.user_id).await?
        .ok_or(AppError::Unauthorized)?;

    if verify_password(&payload.current_password, &user.password_hash).is_err() {
        warn!(user_id = %user.id, "Password change with wrong current password");
        return Err(AppError::access_denied());
    }
    if payload.new_password.len() < 8 {
        return Err(AppError::Validation("Password must be at least 8 characters".into()));
    }

    let password_hash = hash_password(&payload.new_password)?;
    state.user_repo.update_password(&user.id, &password_hash).await?;
    state.auth_service.revoke_all(&user.id).await?;

    info!("Password changed for user: {}", user.id);
    Ok(StatusCode::NO_CONTENT)
}

fn profile(user: User) -> UserProfile {
    UserProfile {
        id: user.id,
        email: user.email,
        name: user.name,
        is_super_admin: user.is_super_admin,
    }
}

fn set_cookies(cookies: &Cookies, access: &str, refresh: &str) {
    let mut access_c = Cookie::new(ACCESS_TOKEN_COOKIE, access.to_string());
    access_c.set_http_only(true);
    access_c.set_secure(true);
    access_c.set_same_site(SameSite::Strict);
    access_c.set_path("/");
    access_c.set_max_age(Duration::minutes(15));
    cookies.add(access_c);

    let mut refresh_c = Cookie::new(REFRESH_TOKEN_COOKIE, refresh.to_string());
    refresh_c.set_http_only(true);
    refresh_c.set_secure(true);
    refresh_c.set_same_site(SameSite::Strict);
    refresh_c.set_path("/");
    refresh_c.set_max_age(Duration::days(7));
    cookies.add(refresh_c);
}
