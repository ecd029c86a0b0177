use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::tenant::Member;
use crate::api::dtos::responses::{CurrentTenantResponse, FeatureStatusResponse, NavigationItem};
use crate::domain::services::defaults::MODULES;
use crate::error::AppError;
use std::collections::HashSet;
use std::sync::Arc;

pub async fn get_current_tenant(
    Member(ctx): Member,
) -> Result<impl IntoResponse, AppError> {
    let is_super_admin = ctx.is_super_admin();
    Ok(Json(CurrentTenantResponse {
        role: ctx.membership.map(|m| m.role),
        tenant: ctx.tenant,
        is_super_admin,
    }))
}

/// Modules the tenant has switched on, in product order.
pub async fn navigation(
    State(state): State<Arc<AppState>>,
    Member(ctx): Member,
) -> Result<impl IntoResponse, AppError> {
    let enabled: HashSet<String> = state.features.list_features(&ctx.scope()).await?
        .into_iter()
        .filter(|f| f.enabled)
        .map(|f| f.feature_key)
        .collect();

    let items: Vec<NavigationItem> = MODULES
        .iter()
        .filter(|(key, _)| enabled.contains(*key))
        .map(|(key, label)| NavigationItem {
            key: key.to_string(),
            label: label.to_string(),
            path: format!("/{}", key),
        })
        .collect();

    Ok(Json(items))
}

/// Entry point of a product module. Answers 404 while the module is off.
pub async fn module_entry(
    State(state): State<Arc<AppState>>,
    Member(ctx): Member,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.features.require_feature(&ctx.scope(), &key).await?;
    Ok(Json(FeatureStatusResponse { key: key.to_ascii_lowercase(), enabled: true }))
}
