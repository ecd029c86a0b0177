use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::super_admin::SuperAdmin;
use crate::api::dtos::requests::{
    AddDomainRequest, CreateTenantRequest, CreateUserRequest, SetFeatureConfigRequest,
    SetFeatureRequest, SetTenantStatusRequest, UpdateTenantRequest,
};
use crate::api::dtos::responses::TenantProvisionedResponse;
use crate::domain::models::{context::TenantScope, tenant::Tenant};
use crate::domain::services::provisioning::{NewTenant, NewUser, TenantBranding};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

async fn load_tenant(state: &AppState, tenant_id: &str) -> Result<Tenant, AppError> {
    state.tenant_repo.find_by_id(tenant_id).await?
        .ok_or(AppError::NotFound("Tenant not found".into()))
}

pub async fn provision_tenant(
    State(state): State<Arc<AppState>>,
    SuperAdmin(admin): SuperAdmin,
    Json(payload): Json<CreateTenantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (tenant, admin_membership) = state.provisioning.provision_tenant(NewTenant {
        name: payload.name,
        slug: payload.slug,
        logo_url: payload.logo_url,
        primary_color: payload.primary_color,
        admin_email: payload.admin_email,
    }).await?;

    info!(by = %admin.user_id, tenant_id = %tenant.id, "Tenant created via platform API");
    Ok((StatusCode::CREATED, Json(TenantProvisionedResponse { tenant, admin_membership })))
}

pub async fn get_tenant(
    State(state): State<Arc<AppState>>,
    _admin: SuperAdmin,
    Path(tenant_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(load_tenant(&state, &tenant_id).await?))
}

pub async fn update_tenant(
    State(state): State<Arc<AppState>>,
    _admin: SuperAdmin,
    Path(tenant_id): Path<String>,
    Json(payload): Json<UpdateTenantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = state.provisioning.update_branding(&tenant_id, TenantBranding {
        name: payload.name,
        logo_url: payload.logo_url,
        primary_color: payload.primary_color,
    }).await?;
    Ok(Json(tenant))
}

pub async fn set_tenant_status(
    State(state): State<Arc<AppState>>,
    _admin: SuperAdmin,
    Path(tenant_id): Path<String>,
    Json(payload): Json<SetTenantStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = state.provisioning.set_status(&tenant_id, payload.status).await?;
    Ok(Json(tenant))
}

pub async fn add_domain(
    State(state): State<Arc<AppState>>,
    _admin: SuperAdmin,
    Path(tenant_id): Path<String>,
    Json(payload): Json<AddDomainRequest>,
) -> Result<impl IntoResponse, AppError> {
    let domain = state.domains.add_domain(&tenant_id, &payload.domain, payload.kind).await?;
    Ok((StatusCode::CREATED, Json(domain)))
}

pub async fn list_domains(
    State(state): State<Arc<AppState>>,
    _admin: SuperAdmin,
    Path(tenant_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = load_tenant(&state, &tenant_id).await?;
    Ok(Json(state.domains.list_domains(&tenant.id).await?))
}

pub async fn remove_domain(
    State(state): State<Arc<AppState>>,
    _admin: SuperAdmin,
    Path(domain_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.domains.remove_domain(&domain_id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn list_tenant_features(
    State(state): State<Arc<AppState>>,
    _admin: SuperAdmin,
    Path(tenant_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = load_tenant(&state, &tenant_id).await?;
    let features = state.features.list_features(&TenantScope::for_tenant(&tenant)).await?;
    Ok(Json(features))
}

pub async fn set_feature(
    State(state): State<Arc<AppState>>,
    _admin: SuperAdmin,
    Path((tenant_id, key)): Path<(String, String)>,
    Json(payload): Json<SetFeatureRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = load_tenant(&state, &tenant_id).await?;
    let feature = state.features.set_feature(&tenant.id, &key, payload.enabled).await?;
    Ok(Json(feature))
}

pub async fn toggle_feature(
    State(state): State<Arc<AppState>>,
    _admin: SuperAdmin,
    Path((tenant_id, key)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = load_tenant(&state, &tenant_id).await?;
    let feature = state.features.toggle_feature(&tenant.id, &key).await?;
    Ok(Json(feature))
}

pub async fn set_feature_config(
    State(state): State<Arc<AppState>>,
    _admin: SuperAdmin,
    Path((tenant_id, key)): Path<(String, String)>,
    Json(payload): Json<SetFeatureConfigRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = load_tenant(&state, &tenant_id).await?;
    let feature = state.features.set_feature_config(&tenant.id, &key, payload.config).await?;
    Ok(Json(feature))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    _admin: SuperAdmin,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.provisioning.create_user(NewUser {
        email: payload.email,
        name: payload.name,
        password: payload.password,
        is_super_admin: payload.is_super_admin,
    }).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
