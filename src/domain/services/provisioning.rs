use std::sync::Arc;
use tracing::{info, warn};
use crate::domain::{
    models::{
        membership::{TenantRole, TenantUser},
        tenant::{Tenant, TenantStatus},
        user::User,
    },
    ports::{MembershipRepository, TenantRepository, UserRepository},
    services::{auth_service::hash_password, defaults::default_feature_keys, feature_flags::FeatureFlagService},
};
use crate::error::AppError;

pub struct NewTenant {
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub admin_email: Option<String>,
}

/// Branding changes; `None` leaves a field as it is.
pub struct TenantBranding {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
}

pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
    pub is_super_admin: bool,
}

/// Platform-level tooling: tenants, their lifecycle, users and memberships.
pub struct ProvisioningService {
    tenant_repo: Arc<dyn TenantRepository>,
    user_repo: Arc<dyn UserRepository>,
    membership_repo: Arc<dyn MembershipRepository>,
    features: Arc<FeatureFlagService>,
}

impl ProvisioningService {
    pub fn new(
        tenant_repo: Arc<dyn TenantRepository>,
        user_repo: Arc<dyn UserRepository>,
        membership_repo: Arc<dyn MembershipRepository>,
        features: Arc<FeatureFlagService>,
    ) -> Self {
        Self { tenant_repo, user_repo, membership_repo, features }
    }

    pub async fn provision_tenant(&self, request: NewTenant) -> Result<(Tenant, Option<TenantUser>), AppError> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Name must not be empty".into()));
        }
        let slug = Tenant::normalize_slug(&request.slug)?;

        let admin = match request.admin_email.as_deref() {
            Some(email) => Some(
                self.user_repo.find_by_email(&User::normalize_email(email)).await?
                    .ok_or(AppError::NotFound("User not found".into()))?
            ),
            None => None,
        };

        let mut tenant = Tenant::new(name, slug);
        tenant.logo_url = request.logo_url;
        tenant.primary_color = request.primary_color;

        let created = self.tenant_repo.create(&tenant).await.map_err(|e| {
            if e.is_unique_violation() {
                AppError::Conflict("Tenant slug already exists".into())
            } else {
                e
            }
        })?;
        info!(tenant_id = %created.id, slug = %created.slug, "Tenant provisioned");

        self.features.initialize_features(&created.id, &default_feature_keys()).await?;

        let membership = match admin {
            Some(user) => Some(self.add_member(&created.id, &user.id, TenantRole::TenantAdmin).await?),
            None => None,
        };

        Ok((created, membership))
    }

    pub async fn set_status(&self, tenant_id: &str, status: TenantStatus) -> Result<Tenant, AppError> {
        let tenant = self.tenant_repo.set_status(tenant_id, status).await?
            .ok_or(AppError::NotFound("Tenant not found".into()))?;
        warn!(tenant_id = %tenant.id, status = %tenant.status, "Tenant status changed");
        Ok(tenant)
    }

    pub async fn update_branding(&self, tenant_id: &str, changes: TenantBranding) -> Result<Tenant, AppError> {
        let mut tenant = self.tenant_repo.find_by_id(tenant_id).await?
            .ok_or(AppError::NotFound("Tenant not found".into()))?;

        if let Some(name) = changes.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::Validation("Name must not be empty".into()));
            }
            tenant.name = name;
        }
        if changes.logo_url.is_some() {
            tenant.logo_url = changes.logo_url;
        }
        if changes.primary_color.is_some() {
            tenant.primary_color = changes.primary_color;
        }

        let updated = self.tenant_repo.update(&tenant).await?;
        info!(tenant_id = %updated.id, "Tenant branding updated");
        Ok(updated)
    }

    pub async fn create_user(&self, request: NewUser) -> Result<User, AppError> {
        let email = User::normalize_email(&request.email);
        if !email.contains('@') {
            return Err(AppError::Validation("Invalid email".into()));
        }
        if request.password.len() < 8 {
            return Err(AppError::Validation("Password must be at least 8 characters".into()));
        }
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".into()));
        }

        let mut user = User::new(email, request.name.trim().to_string(), hash_password(&request.password)?);
        user.is_super_admin = request.is_super_admin;

        let created = self.user_repo.create(&user).await?;
        info!(user_id = %created.id, super_admin = created.is_super_admin, "User created");
        Ok(created)
    }

    pub async fn add_member(&self, tenant_id: &str, user_id: &str, role: TenantRole) -> Result<TenantUser, AppError> {
        let member = TenantUser::new(tenant_id.to_string(), user_id.to_string(), role);
        let created = self.membership_repo.create(&member).await.map_err(|e| {
            if e.is_unique_violation() {
                AppError::Conflict("User is already a member".into())
            } else {
                e
            }
        })?;
        info!(tenant_id = %tenant_id, user_id = %user_id, role = %role, "Membership created");
        Ok(created)
    }
}
