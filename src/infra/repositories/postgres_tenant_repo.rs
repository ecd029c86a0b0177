use crate::domain::{models::tenant::{Tenant, TenantStatus}, ports::TenantRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresTenantRepo {
    pool: PgPool,
}

impl PostgresTenantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantRepository for PostgresTenantRepo {
    async fn create(&self, tenant: &Tenant) -> Result<Tenant, AppError> {
        sqlx::query_as::<_, Tenant>(
            "INSERT INTO tenants (id, name, slug, status, logo_url, primary_color, stripe_customer_id, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *"
        )
            .bind(&tenant.id)
            .bind(&tenant.name)
            .bind(&tenant.slug)
            .bind(tenant.status.as_str())
            .bind(&tenant.logo_url)
            .bind(&tenant.primary_color)
            .bind(&tenant.stripe_customer_id)
            .bind(tenant.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE slug = $1",
        )
            .bind(slug.to_ascii_lowercase())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, tenant: &Tenant) -> Result<Tenant, AppError> {
        sqlx::query_as::<_, Tenant>(
            "UPDATE tenants SET name=$1, logo_url=$2, primary_color=$3, stripe_customer_id=$4 WHERE id=$5 RETURNING *"
        )
            .bind(&tenant.name)
            .bind(&tenant.logo_url)
            .bind(&tenant.primary_color)
            .bind(&tenant.stripe_customer_id)
            .bind(&tenant.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn set_status(&self, id: &str, status: TenantStatus) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "UPDATE tenants SET status=$1 WHERE id=$2 RETURNING *"
        )
            .bind(status.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
