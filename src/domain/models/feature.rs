use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow};
use serde_json::Value;
use crate::error::AppError;

/// Per-tenant module switch. `(tenant_id, feature_key)` is unique.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TenantFeature {
    pub id: String,
    pub tenant_id: String,
    pub feature_key: String,
    pub enabled: bool,
    pub config: Option<Json<Value>>,
    pub updated_at: DateTime<Utc>,
}

pub fn normalize_feature_key(raw: &str) -> Result<String, AppError> {
    let key = raw.trim().to_ascii_lowercase();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-') {
        return Err(AppError::Validation(format!("Invalid feature key: {}", raw.trim())));
    }
    Ok(key)
}
