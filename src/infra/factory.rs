use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::error::AppError;
use crate::state::{AppState, Repositories};
use crate::infra::repositories::{
    postgres_tenant_repo::PostgresTenantRepo, postgres_domain_repo::PostgresDomainRepo,
    postgres_user_repo::PostgresUserRepo, postgres_membership_repo::PostgresMembershipRepo,
    postgres_permission_repo::PostgresPermissionRepo, postgres_feature_repo::PostgresFeatureRepo,
    postgres_auth_repo::PostgresAuthRepo,
    sqlite_tenant_repo::SqliteTenantRepo, sqlite_domain_repo::SqliteDomainRepo,
    sqlite_user_repo::SqliteUserRepo, sqlite_membership_repo::SqliteMembershipRepo,
    sqlite_permission_repo::SqlitePermissionRepo, sqlite_feature_repo::SqliteFeatureRepo,
    sqlite_auth_repo::SqliteAuthRepo,
};

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let database_url = &config.database_url;

    let repos = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse()
            .map_err(|e| AppError::InternalWithMsg(format!("Invalid Postgres URL: {}", e)))?;
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await?;

        run_postgres_migrations(&pool).await?;
        postgres_repositories(pool)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        run_sqlite_migrations(&pool).await?;
        sqlite_repositories(pool)
    };

    AppState::new(config.clone(), repos)
}

pub fn postgres_repositories(pool: PgPool) -> Repositories {
    Repositories {
        tenant_repo: Arc::new(PostgresTenantRepo::new(pool.clone())),
        domain_repo: Arc::new(PostgresDomainRepo::new(pool.clone())),
        user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
        membership_repo: Arc::new(PostgresMembershipRepo::new(pool.clone())),
        permission_repo: Arc::new(PostgresPermissionRepo::new(pool.clone())),
        feature_repo: Arc::new(PostgresFeatureRepo::new(pool.clone())),
        auth_repo: Arc::new(PostgresAuthRepo::new(pool)),
    }
}

pub fn sqlite_repositories(pool: SqlitePool) -> Repositories {
    Repositories {
        tenant_repo: Arc::new(SqliteTenantRepo::new(pool.clone())),
        domain_repo: Arc::new(SqliteDomainRepo::new(pool.clone())),
        user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
        membership_repo: Arc::new(SqliteMembershipRepo::new(pool.clone())),
        permission_repo: Arc::new(SqlitePermissionRepo::new(pool.clone())),
        feature_repo: Arc::new(SqliteFeatureRepo::new(pool.clone())),
        auth_repo: Arc::new(SqliteAuthRepo::new(pool)),
    }
}

pub async fn run_postgres_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("Postgres migrations failed: {}", e)))
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("SQLite migrations failed: {}", e)))
}
