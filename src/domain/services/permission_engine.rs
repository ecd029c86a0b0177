use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};
use crate::domain::{
    models::{
        context::TenantContext,
        membership::{TenantRole, TenantUser},
        permission::{Permission, PermissionKey},
    },
    ports::{MembershipRepository, PermissionRepository},
};
use crate::error::AppError;

/// Capability required to edit other members' roles and grants.
pub const MANAGE_MEMBERS: &str = "settings.member.manage";

pub struct PermissionEngine {
    membership_repo: Arc<dyn MembershipRepository>,
    permission_repo: Arc<dyn PermissionRepository>,
}

impl PermissionEngine {
    pub fn new(membership_repo: Arc<dyn MembershipRepository>, permission_repo: Arc<dyn PermissionRepository>) -> Self {
        Self { membership_repo, permission_repo }
    }

    pub async fn has_permission(&self, user_id: &str, tenant_id: &str, key: &str) -> Result<bool, AppError> {
        let Some(member) = self.membership_repo.find(tenant_id, user_id).await? else {
            return Ok(false);
        };

        match member.role {
            TenantRole::TenantAdmin => Ok(true),
            TenantRole::TenantUser | TenantRole::Custom => {
                let Ok(key) = key.parse::<PermissionKey>() else {
                    return Ok(false);
                };
                self.permission_repo.has_grant(&member.id, key.as_str()).await
            }
        }
    }

    pub async fn list_user_permission_keys(&self, user_id: &str, tenant_id: &str) -> Result<BTreeSet<String>, AppError> {
        let Some(member) = self.membership_repo.find(tenant_id, user_id).await? else {
            return Ok(BTreeSet::new());
        };
        self.keys_for(&member).await
    }

    /// Effective keys of a membership. Admin keys are computed from the catalog.
    pub async fn keys_for(&self, member: &TenantUser) -> Result<BTreeSet<String>, AppError> {
        match member.role {
            TenantRole::TenantAdmin => Ok(self.permission_repo.list_catalog().await?
                .into_iter()
                .map(|p| p.key)
                .collect()),
            TenantRole::TenantUser | TenantRole::Custom => Ok(self.permission_repo
                .list_granted_keys(&member.id).await?
                .into_iter()
                .collect()),
        }
    }

    pub async fn catalog(&self) -> Result<Vec<Permission>, AppError> {
        self.permission_repo.list_catalog().await
    }

    /// Rejects with the generic forbidden error unless the caller is a
    /// super-admin or holds `key` in the context's tenant.
    pub async fn authorize(&self, ctx: &TenantContext, key: &str) -> Result<(), AppError> {
        if ctx.is_super_admin() {
            return Ok(());
        }
        if self.has_permission(&ctx.session.user_id, &ctx.tenant.id, key).await? {
            Ok(())
        } else {
            Err(AppError::access_denied())
        }
    }

    /// Loads a membership and checks it belongs to the caller's tenant.
    pub async fn member_in_context(&self, ctx: &TenantContext, tenant_user_id: &str) -> Result<TenantUser, AppError> {
        match self.membership_repo.find_by_id(tenant_user_id).await? {
            Some(member) if member.tenant_id == ctx.tenant.id => Ok(member),
            Some(member) => {
                warn!(
                    user_id = %ctx.session.user_id,
                    tenant_id = %ctx.tenant.id,
                    target_tenant_id = %member.tenant_id,
                    "Cross-tenant membership access rejected"
                );
                Err(AppError::access_denied())
            }
            None => Err(AppError::access_denied()),
        }
    }

    /// Replaces the member's whole grant set with `keys`. Malformed keys and keys
    /// missing from the catalog are ignored.
    pub async fn replace_permissions<I, S>(&self, ctx: &TenantContext, tenant_user_id: &str, keys: I) -> Result<BTreeSet<String>, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let member = self.member_in_context(ctx, tenant_user_id).await?;

        let keys: BTreeSet<String> = keys
            .into_iter()
            .filter_map(|k| k.as_ref().parse::<PermissionKey>().ok())
            .map(PermissionKey::into_string)
            .collect();
        let keys: Vec<String> = keys.into_iter().collect();

        self.permission_repo.replace_grants(&member.id, &keys).await?;

        let stored: BTreeSet<String> = self.permission_repo.list_granted_keys(&member.id).await?.into_iter().collect();
        info!(
            tenant_id = %ctx.tenant.id,
            tenant_user_id = %member.id,
            granted = stored.len(),
            "Permissions replaced"
        );
        Ok(stored)
    }

    /// Changes the member's role. Grants are kept so a return to `CUSTOM`
    /// restores them.
    pub async fn set_role(&self, ctx: &TenantContext, tenant_user_id: &str, role: TenantRole) -> Result<TenantUser, AppError> {
        let member = self.member_in_context(ctx, tenant_user_id).await?;
        let updated = self.membership_repo.set_role(&member.id, role).await?;
        info!(tenant_id = %ctx.tenant.id, tenant_user_id = %updated.id, role = %updated.role, "Role changed");
        Ok(updated)
    }
}
