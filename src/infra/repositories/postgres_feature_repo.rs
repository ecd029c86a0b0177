use crate::domain::{
    models::{context::TenantScope, feature::TenantFeature},
    ports::FeatureRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

pub struct PostgresFeatureRepo {
    pool: PgPool,
}

impl PostgresFeatureRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeatureRepository for PostgresFeatureRepo {
    async fn find(&self, tenant_id: &str, feature_key: &str) -> Result<Option<TenantFeature>, AppError> {
        sqlx::query_as::<_, TenantFeature>(
            "SELECT * FROM tenant_features WHERE tenant_id = $1 AND feature_key = $2"
        )
            .bind(tenant_id)
            .bind(feature_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, scope: &TenantScope) -> Result<Vec<TenantFeature>, AppError> {
        sqlx::query_as::<_, TenantFeature>(
            "SELECT * FROM tenant_features WHERE tenant_id = $1 ORDER BY feature_key ASC"
        )
            .bind(scope.tenant_id())
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn initialize(&self, tenant_id: &str, keys: &[String]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let now = Utc::now();

        for key in keys {
            sqlx::query(
                "INSERT INTO tenant_features (id, tenant_id, feature_key, enabled, config, updated_at)
                 VALUES ($1, $2, $3, $4, NULL, $5)
                 ON CONFLICT (tenant_id, feature_key) DO NOTHING"
            )
                .bind(Uuid::new_v4().to_string())
                .bind(tenant_id)
                .bind(key)
                .bind(true)
                .bind(now)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn set_enabled(&self, tenant_id: &str, feature_key: &str, enabled: bool) -> Result<TenantFeature, AppError> {
        sqlx::query_as::<_, TenantFeature>(
            "INSERT INTO tenant_features (id, tenant_id, feature_key, enabled, config, updated_at)
             VALUES ($1, $2, $3, $4, NULL, $5)
             ON CONFLICT (tenant_id, feature_key) DO UPDATE SET enabled = excluded.enabled, updated_at = excluded.updated_at
             RETURNING *"
        )
            .bind(Uuid::new_v4().to_string())
            .bind(tenant_id)
            .bind(feature_key)
            .bind(enabled)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn toggle(&self, tenant_id: &str, feature_key: &str) -> Result<TenantFeature, AppError> {
        sqlx::query_as::<_, TenantFeature>(
            "INSERT INTO tenant_features (id, tenant_id, feature_key, enabled, config, updated_at)
             VALUES ($1, $2, $3, $4, NULL, $5)
             ON CONFLICT (tenant_id, feature_key) DO UPDATE SET enabled = NOT tenant_features.enabled, updated_at = excluded.updated_at
             RETURNING *"
        )
            .bind(Uuid::new_v4().to_string())
            .bind(tenant_id)
            .bind(feature_key)
            .bind(true)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn set_config(&self, tenant_id: &str, feature_key: &str, config: Option<Value>) -> Result<TenantFeature, AppError> {
        sqlx::query_as::<_, TenantFeature>(
            "INSERT INTO tenant_features (id, tenant_id, feature_key, enabled, config, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (tenant_id, feature_key) DO UPDATE SET config = excluded.config, updated_at = excluded.updated_at
             RETURNING *"
        )
            .bind(Uuid::new_v4().to_string())
            .bind(tenant_id)
            .bind(feature_key)
            .bind(false)
            .bind(config.map(Json))
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
