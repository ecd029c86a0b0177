use std::sync::Arc;
use tracing::{debug, error};
use crate::domain::{
    models::{context::TenantContext, domain::SurfaceKind, session::Session},
    ports::MembershipRepository,
    services::tenant_resolver::TenantResolver,
};

/// Where a rejected request is sent instead of the protected resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diversion {
    /// No session: go sign in.
    SignIn,
    /// Unknown tenant, inactive tenant or no membership. Deliberately one variant.
    Landing,
}

/// Single entry point deciding who a request is for.
pub struct MembershipGuard {
    resolver: Arc<TenantResolver>,
    membership_repo: Arc<dyn MembershipRepository>,
}

impl MembershipGuard {
    pub fn new(resolver: Arc<TenantResolver>, membership_repo: Arc<dyn MembershipRepository>) -> Self {
        Self { resolver, membership_repo }
    }

    pub async fn require_membership(
        &self,
        session: Option<&Session>,
        raw_host: Option<&str>,
        kind: SurfaceKind,
    ) -> Result<TenantContext, Diversion> {
        let Some(session) = session else {
            return Err(Diversion::SignIn);
        };

        let tenant = match self.resolver.resolve_tenant(raw_host, kind).await {
            Ok(Some(tenant)) => tenant,
            Ok(None) => return Err(Diversion::Landing),
            Err(e) => {
                error!("Tenant resolution failed: {:?}", e);
                return Err(Diversion::Landing);
            }
        };

        if session.is_super_admin {
            debug!(user_id = %session.user_id, tenant_id = %tenant.id, "Super-admin bypasses membership");
            return Ok(TenantContext::new(session.clone(), tenant, None));
        }

        if !tenant.is_active() {
            debug!(tenant_id = %tenant.id, status = %tenant.status, "Tenant not active");
            return Err(Diversion::Landing);
        }

        match self.membership_repo.find(&tenant.id, &session.user_id).await {
            Ok(Some(membership)) => Ok(TenantContext::new(session.clone(), tenant, Some(membership))),
            Ok(None) => {
                debug!(user_id = %session.user_id, tenant_id = %tenant.id, "No membership");
                Err(Diversion::Landing)
            }
            Err(e) => {
                error!("Membership lookup failed: {:?}", e);
                Err(Diversion::Landing)
            }
        }
    }
}
