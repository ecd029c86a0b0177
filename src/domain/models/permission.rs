use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use crate::error::AppError;

/// Catalog entry for one capability. Seeded by migration, never tenant-scoped.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Permission {
    pub id: String,
    #[sqlx(rename = "permission_key")]
    pub key: String,
    pub module: String,
    pub description: String,
}

/// A `module.resource.action` capability key, lowercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PermissionKey(String);

impl PermissionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn module(&self) -> &str {
        self.0.split('.').next().unwrap_or_default()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PermissionKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let segments: Vec<&str> = key.split('.').collect();

        let well_formed = segments.len() == 3
            && segments.iter().all(|seg| {
                !seg.is_empty() && seg.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
            });

        if !well_formed {
            return Err(AppError::Validation(format!("Malformed permission key: {}", s.trim())));
        }

        Ok(PermissionKey(key))
    }
}

/// Grant row for a membership.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct RolePermission {
    pub id: String,
    pub tenant_user_id: String,
    pub permission_id: String,
    pub granted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_key_is_case_normalized() {
        let key: PermissionKey = " Finance.Invoice.Create ".parse().unwrap();
        assert_eq!(key.as_str(), "finance.invoice.create");
        assert_eq!(key.module(), "finance");
    }

    #[test]
    fn test_malformed_permission_keys_are_rejected() {
        assert!("finance.invoice".parse::<PermissionKey>().is_err());
        assert!("finance..create".parse::<PermissionKey>().is_err());
        assert!("finance.invoice.create.extra".parse::<PermissionKey>().is_err());
        assert!("finance.in voice.create".parse::<PermissionKey>().is_err());
        assert!("".parse::<PermissionKey>().is_err());
    }
}
