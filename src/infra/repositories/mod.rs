pub mod sqlite_tenant_repo;
pub mod sqlite_domain_repo;
pub mod sqlite_user_repo;
pub mod sqlite_membership_repo;
pub mod sqlite_permission_repo;
pub mod sqlite_feature_repo;
pub mod sqlite_auth_repo;

pub mod postgres_tenant_repo;
pub mod postgres_domain_repo;
pub mod postgres_user_repo;
pub mod postgres_membership_repo;
pub mod postgres_permission_repo;
pub mod postgres_feature_repo;
pub mod postgres_auth_repo;
