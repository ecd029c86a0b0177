use crate::domain::{
    models::{context::TenantScope, membership::{MemberView, TenantRole, TenantUser}},
    ports::MembershipRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

pub struct PostgresMembershipRepo {
    pool: PgPool,
}

impl PostgresMembershipRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepo {
    async fn create(&self, member: &TenantUser) -> Result<TenantUser, AppError> {
        sqlx::query_as::<_, TenantUser>(
            "INSERT INTO tenant_users (id, tenant_id, user_id, role, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING *"
        )
            .bind(&member.id)
            .bind(&member.tenant_id)
            .bind(&member.user_id)
            .bind(member.role.as_str())
            .bind(member.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find(&self, tenant_id: &str, user_id: &str) -> Result<Option<TenantUser>, AppError> {
        sqlx::query_as::<_, TenantUser>(
            "SELECT * FROM tenant_users WHERE tenant_id = $1 AND user_id = $2"
        )
            .bind(tenant_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TenantUser>, AppError> {
        sqlx::query_as::<_, TenantUser>(
            "SELECT * FROM tenant_users WHERE id = $1"
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, scope: &TenantScope) -> Result<Vec<MemberView>, AppError> {
        sqlx::query_as::<_, MemberView>(
            "SELECT tu.id, tu.user_id, u.email, u.name, tu.role, tu.created_at
             FROM tenant_users tu JOIN users u ON u.id = tu.user_id
             WHERE tu.tenant_id = $1
             ORDER BY u.email ASC"
        )
            .bind(scope.tenant_id())
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn set_role(&self, id: &str, role: TenantRole) -> Result<TenantUser, AppError> {
        sqlx::query_as::<_, TenantUser>(
            "UPDATE tenant_users SET role = $1 WHERE id = $2 RETURNING *"
        )
            .bind(role.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Member not found".into()))
    }

    async fn delete(&self, scope: &TenantScope, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tenant_users WHERE tenant_id = $1 AND id = $2")
            .bind(scope.tenant_id())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("PostgreSQL membership deletion failed: {:?}", e);
                AppError::Database(e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
