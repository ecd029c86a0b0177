use crate::domain::models::{
    tenant::{Tenant, TenantStatus}, domain::{Domain, SurfaceKind}, user::User,
    membership::{TenantUser, TenantRole, MemberView}, permission::Permission,
    feature::TenantFeature, context::TenantScope, auth::RefreshTokenRecord,
};
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn create(&self, tenant: &Tenant) -> Result<Tenant, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, AppError>;
    async fn update(&self, tenant: &Tenant) -> Result<Tenant, AppError>;
    async fn set_status(&self, id: &str, status: TenantStatus) -> Result<Option<Tenant>, AppError>;
}

#[async_trait]
pub trait DomainRepository: Send + Sync {
    async fn create(&self, domain: &Domain) -> Result<Domain, AppError>;
    /// Exact match on the normalized hostname within one surface kind.
    async fn find_tenant(&self, hostname: &str, kind: SurfaceKind) -> Result<Option<Tenant>, AppError>;
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Domain>, AppError>;
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn update_password(&self, id: &str, password_hash: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    async fn create(&self, member: &TenantUser) -> Result<TenantUser, AppError>;
    async fn find(&self, tenant_id: &str, user_id: &str) -> Result<Option<TenantUser>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<TenantUser>, AppError>;
    async fn list(&self, scope: &TenantScope) -> Result<Vec<MemberView>, AppError>;
    async fn set_role(&self, id: &str, role: TenantRole) -> Result<TenantUser, AppError>;
    async fn delete(&self, scope: &TenantScope, id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait PermissionRepository: Send + Sync {
    async fn list_catalog(&self) -> Result<Vec<Permission>, AppError>;
    async fn has_grant(&self, tenant_user_id: &str, key: &str) -> Result<bool, AppError>;
    async fn list_granted_keys(&self, tenant_user_id: &str) -> Result<Vec<String>, AppError>;
    /// Deletes every grant of the membership and inserts the given keys in one
    /// transaction. Keys missing from the catalog are skipped.
    async fn replace_grants(&self, tenant_user_id: &str, keys: &[String]) -> Result<(), AppError>;
}

#[async_trait]
pub trait FeatureRepository: Send + Sync {
    async fn find(&self, tenant_id: &str, feature_key: &str) -> Result<Option<TenantFeature>, AppError>;
    async fn list(&self, scope: &TenantScope) -> Result<Vec<TenantFeature>, AppError>;
    /// Inserts an enabled row per key; existing rows are left untouched.
    async fn initialize(&self, tenant_id: &str, keys: &[String]) -> Result<(), AppError>;
    async fn set_enabled(&self, tenant_id: &str, feature_key: &str, enabled: bool) -> Result<TenantFeature, AppError>;
    /// Flips the stored value in a single statement; an absent row counts as disabled.
    async fn toggle(&self, tenant_id: &str, feature_key: &str) -> Result<TenantFeature, AppError>;
    async fn set_config(&self, tenant_id: &str, feature_key: &str, config: Option<Value>) -> Result<TenantFeature, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_refresh_tokens_for_user(&self, user_id: &str) -> Result<(), AppError>;
}
