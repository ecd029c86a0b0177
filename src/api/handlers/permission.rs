use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::tenant::Member;
use crate::api::dtos::requests::ReplacePermissionsRequest;
use crate::api::dtos::responses::{MyPermissionsResponse, PermissionSetResponse};
use crate::domain::services::permission_engine::MANAGE_MEMBERS;
use crate::error::AppError;
use std::collections::BTreeSet;
use std::sync::Arc;

pub async fn list_catalog(
    State(state): State<Arc<AppState>>,
    Member(_ctx): Member,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.permissions.catalog().await?))
}

pub async fn my_permissions(
    State(state): State<Arc<AppState>>,
    Member(ctx): Member,
) -> Result<impl IntoResponse, AppError> {
    let keys = match &ctx.membership {
        Some(member) => state.permissions.keys_for(member).await?,
        None => BTreeSet::new(),
    };

    Ok(Json(MyPermissionsResponse {
        role: ctx.membership.as_ref().map(|m| m.role),
        is_super_admin: ctx.is_super_admin(),
        keys,
    }))
}

pub async fn get_member_permissions(
    State(state): State<Arc<AppState>>,
    Member(ctx): Member,
    Path(member_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let target = state.permissions.member_in_context(&ctx, &member_id).await?;
    if target.user_id != ctx.session.user_id {
        state.permissions.authorize(&ctx, MANAGE_MEMBERS).await?;
    }

    let keys = state.permissions.keys_for(&target).await?;
    Ok(Json(PermissionSetResponse {
        tenant_user_id: target.id,
        role: target.role,
        keys,
    }))
}

pub async fn replace_member_permissions(
    State(state): State<Arc<AppState>>,
    Member(ctx): Member,
    Path(member_id): Path<String>,
    Json(payload): Json<ReplacePermissionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.permissions.authorize(&ctx, MANAGE_MEMBERS).await?;

    let target = state.permissions.member_in_context(&ctx, &member_id).await?;
    if target.user_id == ctx.session.user_id {
        return Err(AppError::Conflict("Cannot change your own permissions".into()));
    }

    let keys = state.permissions.replace_permissions(&ctx, &target.id, &payload.keys).await?;

    Ok(Json(PermissionSetResponse {
        tenant_user_id: target.id,
        role: target.role,
        keys,
    }))
}
