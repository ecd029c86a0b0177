use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use crate::state::AppState;
use crate::domain::models::session::Session;
use crate::api::extractors::auth::read_session;
use crate::error::AppError;
use std::sync::Arc;
use tracing::warn;

/// Platform tooling: requires the super-admin claim, regardless of host.
pub struct SuperAdmin(pub Session);

impl<S> FromRequestParts<S> for SuperAdmin
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let session = read_session(parts, &app_state)
            .map_err(IntoResponse::into_response)?
            .ok_or_else(|| AppError::Unauthorized.into_response())?;

        if !session.is_super_admin {
            warn!(user_id = %session.user_id, "Non super-admin on platform route");
            return Err(AppError::access_denied().into_response());
        }

        Ok(SuperAdmin(session))
    }
}
