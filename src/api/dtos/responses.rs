use crate::domain::models::{membership::{TenantRole, TenantUser}, tenant::{PublicTenant, Tenant}};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Serialize)]
pub struct TenantProvisionedResponse {
    pub tenant: Tenant,
    pub admin_membership: Option<TenantUser>,
}

#[derive(Serialize)]
pub struct CurrentTenantResponse {
    pub tenant: Tenant,
    pub role: Option<TenantRole>,
    pub is_super_admin: bool,
}

#[derive(Serialize)]
pub struct SiteResponse {
    pub tenant: PublicTenant,
    pub signed_in: bool,
}

#[derive(Serialize)]
pub struct PermissionSetResponse {
    pub tenant_user_id: String,
    pub role: TenantRole,
    pub keys: BTreeSet<String>,
}

#[derive(Serialize)]
pub struct MyPermissionsResponse {
    pub role: Option<TenantRole>,
    pub is_super_admin: bool,
    pub keys: BTreeSet<String>,
}

#[derive(Serialize)]
pub struct FeatureStatusResponse {
    pub key: String,
    pub enabled: bool,
}

#[derive(Serialize)]
pub struct NavigationItem {
    pub key: String,
    pub label: String,
    pub path: String,
}
