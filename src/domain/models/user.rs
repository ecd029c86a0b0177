use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A platform-wide principal. Not scoped to any tenant.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_super_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, name: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: Self::normalize_email(&email),
            name,
            password_hash,
            is_super_admin: false,
            created_at: Utc::now(),
        }
    }

    pub fn normalize_email(raw: &str) -> String {
        raw.trim().to_ascii_lowercase()
    }
}
