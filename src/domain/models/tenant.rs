use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use crate::error::AppError;

/// Labels that never name a tenant: they are the platform's own hostnames.
pub const RESERVED_LABELS: &[&str] = &["www", "app"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenantStatus {
    Active,
    Suspended,
    Archived,
}

impl TenantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantStatus::Active => "ACTIVE",
            TenantStatus::Suspended => "SUSPENDED",
            TenantStatus::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TenantStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(TenantStatus::Active),
            "SUSPENDED" => Ok(TenantStatus::Suspended),
            "ARCHIVED" => Ok(TenantStatus::Archived),
            other => Err(AppError::Validation(format!("Unknown tenant status: {}", other))),
        }
    }
}

impl TryFrom<String> for TenantStatus {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[sqlx(try_from = "String")]
    pub status: TenantStatus,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    #[serde(skip_serializing)]
    pub stripe_customer_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Tenant {
    pub fn new(name: String, slug: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            slug,
            status: TenantStatus::Active,
            logo_url: None,
            primary_color: None,
            stripe_customer_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == TenantStatus::Active
    }

    /// Lowercases the slug and checks it is usable as a DNS label.
    pub fn normalize_slug(raw: &str) -> Result<String, AppError> {
        let slug = raw.trim().to_ascii_lowercase();

        if slug.is_empty() || slug.len() > 63 {
            return Err(AppError::Validation("Slug must be between 1 and 63 characters".into()));
        }
        if !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            return Err(AppError::Validation("Slug may only contain a-z, 0-9 and '-'".into()));
        }
        if slug.starts_with('-') || slug.ends_with('-') {
            return Err(AppError::Validation("Slug must not start or end with '-'".into()));
        }
        if RESERVED_LABELS.contains(&slug.as_str()) {
            return Err(AppError::Validation(format!("Slug '{}' is reserved", slug)));
        }

        Ok(slug)
    }
}

/// Public branding exposed on the marketing site surface.
#[derive(Debug, Serialize)]
pub struct PublicTenant {
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
}

impl From<Tenant> for PublicTenant {
    fn from(tenant: Tenant) -> Self {
        Self {
            name: tenant.name,
            slug: tenant.slug,
            logo_url: tenant.logo_url,
            primary_color: tenant.primary_color,
        }
    }
}
