use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use crate::error::AppError;

/// Role a user holds inside one tenant. Closed set; the permission engine
/// branches on it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenantRole {
    TenantAdmin,
    TenantUser,
    Custom,
}

impl TenantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantRole::TenantAdmin => "TENANT_ADMIN",
            TenantRole::TenantUser => "TENANT_USER",
            TenantRole::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for TenantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TenantRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TENANT_ADMIN" => Ok(TenantRole::TenantAdmin),
            "TENANT_USER" => Ok(TenantRole::TenantUser),
            "CUSTOM" => Ok(TenantRole::Custom),
            other => Err(AppError::Validation(format!("Unknown role: {}", other))),
        }
    }
}

impl TryFrom<String> for TenantRole {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Membership row linking a user to a tenant. `(tenant_id, user_id)` is unique.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TenantUser {
    pub id: String,
    pub tenant_id: String,
    pub user_id: String,
    #[sqlx(try_from = "String")]
    pub role: TenantRole,
    pub created_at: DateTime<Utc>,
}

impl TenantUser {
    pub fn new(tenant_id: String, user_id: String, role: TenantRole) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            user_id,
            role,
            created_at: Utc::now(),
        }
    }
}

/// Membership joined with the user's public profile, for member listings.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct MemberView {
    pub id: String,
    pub user_id: String,
    pub email: String,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub role: TenantRole,
    pub created_at: DateTime<Utc>,
}
