use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::tenant::Member;
use crate::api::dtos::requests::{AddMemberRequest, SetRoleRequest};
use crate::domain::models::user::User;
use crate::domain::services::permission_engine::MANAGE_MEMBERS;
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, error};

const READ_MEMBERS: &str = "settings.member.read";

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    Member(ctx): Member,
) -> Result<impl IntoResponse, AppError> {
    state.permissions.authorize(&ctx, READ_MEMBERS).await?;
    let members = state.membership_repo.list(&ctx.scope()).await?;
    Ok(Json(members))
}

pub async fn add_member(
    State(state): State<Arc<AppState>>,
    Member(ctx): Member,
    Json(payload): Json<AddMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.permissions.authorize(&ctx, MANAGE_MEMBERS).await?;

    let user = state.user_repo.find_by_email(&User::normalize_email(&payload.email)).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    let created = state.provisioning.add_member(&ctx.tenant.id, &user.id, payload.role).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_member(
    State(state): State<Arc<AppState>>,
    Member(ctx): Member,
    Path(member_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.permissions.authorize(&ctx, MANAGE_MEMBERS).await?;

    let target = state.permissions.member_in_context(&ctx, &member_id).await?;
    if target.user_id == ctx.session.user_id {
        return Err(AppError::Conflict("Cannot remove yourself".into()));
    }

    match state.membership_repo.delete(&ctx.scope(), &target.id).await {
        Ok(true) => {
            info!(tenant_id = %ctx.tenant.id, tenant_user_id = %target.id, "Member removed");
            Ok(Json(serde_json::json!({"status": "deleted"})))
        }
        Ok(false) => Err(AppError::NotFound("Member not found".into())),
        Err(e) => {
            error!("Failed to remove member {}: {:?}", target.id, e);
            Err(e)
        }
    }
}

pub async fn set_member_role(
    State(state): State<Arc<AppState>>,
    Member(ctx): Member,
    Path(member_id): Path<String>,
    Json(payload): Json<SetRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.permissions.authorize(&ctx, MANAGE_MEMBERS).await?;

    let target = state.permissions.member_in_context(&ctx, &member_id).await?;
    if target.user_id == ctx.session.user_id {
        return Err(AppError::Conflict("Cannot change your own role".into()));
    }

    let updated = state.permissions.set_role(&ctx, &target.id, payload.role).await?;
    Ok(Json(updated))
}
