use std::sync::Arc;
use serde_json::Value;
use tracing::info;
use crate::domain::{
    models::{context::TenantScope, feature::{normalize_feature_key, TenantFeature}},
    ports::FeatureRepository,
};
use crate::error::AppError;

/// Per-tenant module switches, independent of permissions.
pub struct FeatureFlagService {
    repo: Arc<dyn FeatureRepository>,
}

impl FeatureFlagService {
    pub fn new(repo: Arc<dyn FeatureRepository>) -> Self {
        Self { repo }
    }

    /// Unknown flags are disabled.
    pub async fn is_feature_enabled(&self, tenant_id: &str, feature_key: &str) -> Result<bool, AppError> {
        let Ok(key) = normalize_feature_key(feature_key) else {
            return Ok(false);
        };
        Ok(self.repo.find(tenant_id, &key).await?.map(|f| f.enabled).unwrap_or(false))
    }

    /// Route gate: disabled modules look like missing ones.
    pub async fn require_feature(&self, scope: &TenantScope, feature_key: &str) -> Result<(), AppError> {
        if self.is_feature_enabled(scope.tenant_id(), feature_key).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Not found".into()))
        }
    }

    pub async fn list_features(&self, scope: &TenantScope) -> Result<Vec<TenantFeature>, AppError> {
        self.repo.list(scope).await
    }

    /// Seeds one enabled row per key. Safe to retry: existing rows keep their state.
    pub async fn initialize_features(&self, tenant_id: &str, keys: &[String]) -> Result<(), AppError> {
        let keys = keys
            .iter()
            .map(|k| normalize_feature_key(k))
            .collect::<Result<Vec<_>, _>>()?;
        self.repo.initialize(tenant_id, &keys).await?;
        info!(tenant_id = %tenant_id, count = keys.len(), "Features initialized");
        Ok(())
    }

    pub async fn set_feature(&self, tenant_id: &str, feature_key: &str, enabled: bool) -> Result<TenantFeature, AppError> {
        let key = normalize_feature_key(feature_key)?;
        let feature = self.repo.set_enabled(tenant_id, &key, enabled).await?;
        info!(tenant_id = %tenant_id, feature = %key, enabled, "Feature set");
        Ok(feature)
    }

    pub async fn toggle_feature(&self, tenant_id: &str, feature_key: &str) -> Result<TenantFeature, AppError> {
        let key = normalize_feature_key(feature_key)?;
        let feature = self.repo.toggle(tenant_id, &key).await?;
        info!(tenant_id = %tenant_id, feature = %key, enabled = feature.enabled, "Feature toggled");
        Ok(feature)
    }

    pub async fn set_feature_config(&self, tenant_id: &str, feature_key: &str, config: Option<Value>) -> Result<TenantFeature, AppError> {
        let key = normalize_feature_key(feature_key)?;
        self.repo.set_config(tenant_id, &key, config).await
    }
}
