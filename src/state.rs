use std::sync::Arc;
use crate::domain::ports::{
    TenantRepository, DomainRepository, UserRepository, MembershipRepository,
    PermissionRepository, FeatureRepository, AuthRepository,
};
use crate::domain::services::{
    auth_service::AuthService, domain_registry::DomainRegistry, feature_flags::FeatureFlagService,
    membership_guard::MembershipGuard, permission_engine::PermissionEngine,
    provisioning::ProvisioningService, tenant_resolver::TenantResolver,
};
use crate::config::Config;
use crate::error::AppError;

/// Storage adapters for one backend.
#[derive(Clone)]
pub struct Repositories {
    pub tenant_repo: Arc<dyn TenantRepository>,
    pub domain_repo: Arc<dyn DomainRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub membership_repo: Arc<dyn MembershipRepository>,
    pub permission_repo: Arc<dyn PermissionRepository>,
    pub feature_repo: Arc<dyn FeatureRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub tenant_repo: Arc<dyn TenantRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub membership_repo: Arc<dyn MembershipRepository>,
    pub auth_service: Arc<AuthService>,
    pub domains: Arc<DomainRegistry>,
    pub resolver: Arc<TenantResolver>,
    pub guard: Arc<MembershipGuard>,
    pub permissions: Arc<PermissionEngine>,
    pub features: Arc<FeatureFlagService>,
    pub provisioning: Arc<ProvisioningService>,
}

impl AppState {
    pub fn new(config: Config, repos: Repositories) -> Result<Self, AppError> {
        let auth_service = Arc::new(AuthService::new(repos.auth_repo.clone(), &config)?);

        let domains = Arc::new(DomainRegistry::new(repos.domain_repo.clone(), repos.tenant_repo.clone()));
        let resolver = Arc::new(TenantResolver::new(domains.clone(), repos.tenant_repo.clone(), config.mode));
        let guard = Arc::new(MembershipGuard::new(resolver.clone(), repos.membership_repo.clone()));
        let permissions = Arc::new(PermissionEngine::new(repos.membership_repo.clone(), repos.permission_repo.clone()));
        let features = Arc::new(FeatureFlagService::new(repos.feature_repo.clone()));
        let provisioning = Arc::new(ProvisioningService::new(
            repos.tenant_repo.clone(),
            repos.user_repo.clone(),
            repos.membership_repo.clone(),
            features.clone(),
        ));

        Ok(Self {
            config,
            tenant_repo: repos.tenant_repo,
            user_repo: repos.user_repo,
            membership_repo: repos.membership_repo,
            auth_service,
            domains,
            resolver,
            guard,
            permissions,
            features,
            provisioning,
        })
    }
}
