use crate::domain::models::{membership::TenantUser, session::Session, tenant::Tenant};

/// Output of the membership guard: who the request is for and on whose behalf.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub session: Session,
    pub tenant: Tenant,
    /// `None` only for super-admins without a membership row.
    pub membership: Option<TenantUser>,
}

impl TenantContext {
    pub(crate) fn new(session: Session, tenant: Tenant, membership: Option<TenantUser>) -> Self {
        Self { session, tenant, membership }
    }

    pub fn scope(&self) -> TenantScope {
        TenantScope(self.tenant.id.clone())
    }

    pub fn is_super_admin(&self) -> bool {
        self.session.is_super_admin
    }
}

/// Tenant id bound once per request. Tenant-scoped listings take this instead
/// of a raw id so callers cannot pass an arbitrary tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantScope(String);

impl TenantScope {
    /// Platform tooling acting on a tenant it already loaded.
    pub(crate) fn for_tenant(tenant: &Tenant) -> Self {
        TenantScope(tenant.id.clone())
    }

    pub fn tenant_id(&self) -> &str {
        &self.0
    }
}
