use std::env;
use crate::error::AppError;

/// Runtime mode. Anything that is not explicitly development or test is production.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionMode {
    Production,
    Development,
    Test,
}

impl ExecutionMode {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("development") | Some("dev") => ExecutionMode::Development,
            Some("test") => ExecutionMode::Test,
            _ => ExecutionMode::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, ExecutionMode::Production)
    }
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub mode: ExecutionMode,
    pub jwt_secret_key: String, // Private key (Ed25519 PEM)
    pub jwt_public_key: String, // Public key (Ed25519 PEM)
    pub auth_issuer: String,
    pub sign_in_path: String,
    pub landing_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| AppError::Validation("PORT must be a number".into()))?,
            Err(_) => 3000,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port,
            mode: ExecutionMode::parse(env::var("APP_ENV").ok().as_deref()),
            jwt_secret_key: required("JWT_SECRET_KEY")?,
            jwt_public_key: required("JWT_PUBLIC_KEY")?,
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "https://api.tenancy.local".to_string()),
            sign_in_path: env::var("SIGN_IN_PATH").unwrap_or_else(|_| "/login".to_string()),
            landing_path: env::var("LANDING_PATH").unwrap_or_else(|_| "/".to_string()),
        })
    }
}

fn required(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::InternalWithMsg(format!("{} must be set", name)))
}
