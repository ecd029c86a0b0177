use crate::domain::models::{domain::SurfaceKind, membership::TenantRole, tenant::TenantStatus};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Deserialize)]
pub struct CreateTenantRequest {
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub admin_email: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTenantRequest {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
}

#[derive(Deserialize)]
pub struct SetTenantStatusRequest {
    pub status: TenantStatus,
}

#[derive(Deserialize)]
pub struct AddDomainRequest {
    pub domain: String,
    pub kind: SurfaceKind,
}

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub is_super_admin: bool,
}

#[derive(Deserialize)]
pub struct AddMemberRequest {
    pub email: String,
    pub role: TenantRole,
}

#[derive(Deserialize)]
pub struct SetRoleRequest {
    pub role: TenantRole,
}

#[derive(Deserialize)]
pub struct ReplacePermissionsRequest {
    pub keys: Vec<String>,
}

#[derive(Deserialize)]
pub struct SetFeatureRequest {
    pub enabled: bool,
}

#[derive(Deserialize)]
pub struct SetFeatureConfigRequest {
    pub config: Option<Value>,
}
