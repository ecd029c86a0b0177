use crate::domain::{models::permission::Permission, ports::PermissionRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PostgresPermissionRepo {
    pool: PgPool,
}

impl PostgresPermissionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionRepository for PostgresPermissionRepo {
    async fn list_catalog(&self) -> Result<Vec<Permission>, AppError> {
        sqlx::query_as::<_, Permission>(
            "SELECT id, permission_key, module, description FROM permissions ORDER BY permission_key ASC"
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn has_grant(&self, tenant_user_id: &str, key: &str) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM role_permissions rp JOIN permissions p ON p.id = rp.permission_id
                WHERE rp.tenant_user_id = $1 AND p.permission_key = $2 AND rp.granted
             )"
        )
            .bind(tenant_user_id)
            .bind(key)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_granted_keys(&self, tenant_user_id: &str) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>(
            "SELECT p.permission_key FROM role_permissions rp JOIN permissions p ON p.id = rp.permission_id
             WHERE rp.tenant_user_id = $1 AND rp.granted
             ORDER BY p.permission_key ASC"
        )
            .bind(tenant_user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn replace_grants(&self, tenant_user_id: &str, keys: &[String]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM role_permissions WHERE tenant_user_id = $1")
            .bind(tenant_user_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        for key in keys {
            sqlx::query(
                "INSERT INTO role_permissions (id, tenant_user_id, permission_id, granted)
                 SELECT $1, $2, id, $3 FROM permissions WHERE permission_key = $4"
            )
                .bind(Uuid::new_v4().to_string())
                .bind(tenant_user_id)
                .bind(true)
                .bind(key)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}
