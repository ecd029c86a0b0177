use std::sync::Arc;
use tracing::debug;
use crate::config::ExecutionMode;
use crate::domain::{
    models::{domain::SurfaceKind, tenant::Tenant},
    ports::TenantRepository,
    services::{
        domain_registry::DomainRegistry,
        host::{candidate_slug, normalize_host, DEFAULT_TENANT_SLUG},
    },
};
use crate::error::AppError;

/// Maps an inbound host header to the tenant whose data the request touches.
///
/// Order, first match wins:
/// 1. explicit domain mapping for the surface kind
/// 2. subdomain convention (`localhost` and loopback map to `default`)
/// 3. the `default` tenant, outside production only
///
/// `Ok(None)` means "no tenant" and is not an error.
pub struct TenantResolver {
    registry: Arc<DomainRegistry>,
    tenant_repo: Arc<dyn TenantRepository>,
    mode: ExecutionMode,
}

impl TenantResolver {
    pub fn new(registry: Arc<DomainRegistry>, tenant_repo: Arc<dyn TenantRepository>, mode: ExecutionMode) -> Self {
        Self { registry, tenant_repo, mode }
    }

    pub async fn resolve_tenant(&self, raw_host: Option<&str>, kind: SurfaceKind) -> Result<Option<Tenant>, AppError> {
        let Some(host) = normalize_host(raw_host) else {
            debug!("No host header, tenant unresolved");
            return Ok(None);
        };

        if let Some(tenant) = self.registry.lookup_domain(&host, kind).await? {
            debug!(host = %host, tenant_id = %tenant.id, "Tenant resolved by domain mapping");
            return Ok(Some(tenant));
        }

        if let Some(slug) = candidate_slug(&host) {
            if let Some(tenant) = self.tenant_repo.find_by_slug(&slug).await? {
                debug!(host = %host, tenant_id = %tenant.id, "Tenant resolved by subdomain");
                return Ok(Some(tenant));
            }
        }

        // Never relax: a misconfigured production host must not land in the default tenant.
        if !self.mode.is_production() {
            if let Some(tenant) = self.tenant_repo.find_by_slug(DEFAULT_TENANT_SLUG).await? {
                debug!(host = %host, "Falling back to default tenant");
                return Ok(Some(tenant));
            }
        }

        debug!(host = %host, "Tenant unresolved");
        Ok(None)
    }
}
