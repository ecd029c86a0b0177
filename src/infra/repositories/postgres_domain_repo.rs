use crate::domain::{
    models::{domain::{Domain, SurfaceKind}, tenant::Tenant},
    ports::DomainRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresDomainRepo {
    pool: PgPool,
}

impl PostgresDomainRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DomainRepository for PostgresDomainRepo {
    async fn create(&self, domain: &Domain) -> Result<Domain, AppError> {
        sqlx::query_as::<_, Domain>(
            "INSERT INTO domains (id, tenant_id, domain, kind, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING *"
        )
            .bind(&domain.id)
            .bind(&domain.tenant_id)
            .bind(&domain.domain)
            .bind(domain.kind.as_str())
            .bind(domain.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_tenant(&self, hostname: &str, kind: SurfaceKind) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT t.* FROM tenants t JOIN domains d ON d.tenant_id = t.id WHERE d.domain = $1 AND d.kind = $2"
        )
            .bind(hostname)
            .bind(kind.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Domain>, AppError> {
        sqlx::query_as::<_, Domain>(
            "SELECT * FROM domains WHERE tenant_id = $1 ORDER BY domain ASC, kind ASC"
        )
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM domains WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
