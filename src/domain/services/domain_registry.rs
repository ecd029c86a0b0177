use std::sync::Arc;
use tracing::info;
use crate::domain::{
    models::{domain::{Domain, SurfaceKind}, tenant::Tenant},
    ports::{DomainRepository, TenantRepository},
    services::host::normalize_host,
};
use crate::error::AppError;

/// Explicit hostname to tenant mappings, one namespace per surface kind.
pub struct DomainRegistry {
    domain_repo: Arc<dyn DomainRepository>,
    tenant_repo: Arc<dyn TenantRepository>,
}

impl DomainRegistry {
    pub fn new(domain_repo: Arc<dyn DomainRepository>, tenant_repo: Arc<dyn TenantRepository>) -> Self {
        Self { domain_repo, tenant_repo }
    }

    pub async fn lookup_domain(&self, hostname: &str, kind: SurfaceKind) -> Result<Option<Tenant>, AppError> {
        let hostname = hostname.trim().to_ascii_lowercase();
        if hostname.is_empty() {
            return Ok(None);
        }
        self.domain_repo.find_tenant(&hostname, kind).await
    }

    pub async fn add_domain(&self, tenant_id: &str, hostname: &str, kind: SurfaceKind) -> Result<Domain, AppError> {
        let tenant = self.tenant_repo.find_by_id(tenant_id).await?
            .ok_or(AppError::NotFound("Tenant not found".into()))?;

        let hostname = normalize_host(Some(hostname))
            .ok_or(AppError::Validation("Hostname must not be empty".into()))?;

        let domain = Domain::new(tenant.id, hostname, kind);
        let created = self.domain_repo.create(&domain).await.map_err(|e| {
            if e.is_unique_violation() {
                AppError::Conflict("Domain already exists".into())
            } else {
                e
            }
        })?;

        info!(tenant_id = %created.tenant_id, domain = %created.domain, kind = %created.kind, "Domain mapped");
        Ok(created)
    }

    pub async fn list_domains(&self, tenant_id: &str) -> Result<Vec<Domain>, AppError> {
        self.domain_repo.list_by_tenant(tenant_id).await
    }

    pub async fn remove_domain(&self, domain_id: &str) -> Result<(), AppError> {
        if !self.domain_repo.delete(domain_id).await? {
            return Err(AppError::NotFound("Domain not found".into()));
        }
        info!(domain_id = %domain_id, "Domain mapping removed");
        Ok(())
    }
}
