use axum::{response::IntoResponse, Json};
use crate::api::dtos::responses::SiteResponse;
use crate::api::extractors::{maybe_auth::MaybeSession, tenant::SiteTenant};
use crate::error::AppError;

/// Public marketing site of the tenant behind the host. Never redirects.
pub async fn get_site(
    SiteTenant(tenant): SiteTenant,
    MaybeSession(session): MaybeSession,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(SiteResponse {
        tenant: tenant.into(),
        signed_in: session.is_some(),
    }))
}
