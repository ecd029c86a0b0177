use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use crate::error::AppError;

/// Which public boundary a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurfaceKind {
    /// The authenticated management application.
    App,
    /// The tenant's public marketing site.
    Site,
}

impl SurfaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceKind::App => "APP",
            SurfaceKind::Site => "SITE",
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurfaceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "APP" => Ok(SurfaceKind::App),
            "SITE" => Ok(SurfaceKind::Site),
            other => Err(AppError::Validation(format!("Unknown surface kind: {}", other))),
        }
    }
}

impl TryFrom<String> for SurfaceKind {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Explicit hostname to tenant mapping. `(domain, kind)` is unique.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Domain {
    pub id: String,
    pub tenant_id: String,
    pub domain: String,
    #[sqlx(try_from = "String")]
    pub kind: SurfaceKind,
    pub created_at: DateTime<Utc>,
}

impl Domain {
    pub fn new(tenant_id: String, domain: String, kind: SurfaceKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            domain,
            kind,
            created_at: Utc::now(),
        }
    }
}
