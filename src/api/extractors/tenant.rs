use axum::{
    extract::{FromRequestParts, FromRef},
    http::{header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use crate::state::AppState;
use crate::config::Config;
use crate::api::extractors::auth::read_session;
use crate::domain::models::{context::TenantContext, domain::SurfaceKind, tenant::Tenant};
use crate::domain::services::membership_guard::Diversion;
use crate::error::AppError;
use std::sync::Arc;
use tracing::Span;

/// Host the client addressed: the `Host` header, or the URI authority on HTTP/2.
pub fn request_host(parts: &Parts) -> Option<String> {
    parts.headers.get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or_else(|| parts.uri.authority().map(|authority| authority.to_string()))
}

pub fn divert(config: &Config, diversion: Diversion) -> Response {
    match diversion {
        Diversion::SignIn => Redirect::to(&config.sign_in_path).into_response(),
        Diversion::Landing => Redirect::to(&config.landing_path).into_response(),
    }
}

/// Authenticated member (or super-admin) of the tenant the host resolves to
/// on the application surface.
pub struct Member(pub TenantContext);

impl<S> FromRequestParts<S> for Member
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let session = read_session(parts, &app_state).map_err(IntoResponse::into_response)?;
        let host = request_host(parts);

        match app_state.guard.require_membership(session.as_ref(), host.as_deref(), SurfaceKind::App).await {
            Ok(ctx) => {
                Span::current().record("tenant_id", ctx.tenant.id.as_str());
                Ok(Member(ctx))
            }
            Err(diversion) => Err(divert(&app_state.config, diversion)),
        }
    }
}

/// Tenant behind the public marketing site host. No session involved.
pub struct SiteTenant(pub Tenant);

impl<S> FromRequestParts<S> for SiteTenant
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let host = request_host(parts);

        match app_state.resolver.resolve_tenant(host.as_deref(), SurfaceKind::Site).await? {
            Some(tenant) if tenant.is_active() => {
                Span::current().record("tenant_id", tenant.id.as_str());
                Ok(SiteTenant(tenant))
            }
            _ => Err(AppError::NotFound("Not found".into())),
        }
    }
}
