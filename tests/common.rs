#![allow(dead_code)]

use tenancy_backend::{
    api::router::create_router,
    config::{Config, ExecutionMode},
    domain::models::{session::Session, tenant::Tenant, user::User},
    domain::services::provisioning::{NewTenant, NewUser},
    infra::factory::{run_sqlite_migrations, sqlite_repositories},
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::time::Duration;
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    response::Response,
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::Value;

pub const TEST_PASSWORD: &str = "securepassword123";

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_mode(ExecutionMode::Test).await
    }

    pub async fn with_mode(mode: ExecutionMode) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        run_sqlite_migrations(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = test_config(&db_url, mode);

        let state = Arc::new(
            AppState::new(config, sqlite_repositories(pool.clone())).expect("Failed to build state"),
        );
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn create_user(&self, email: &str, super_admin: bool) -> User {
        self.state.provisioning.create_user(NewUser {
            email: email.to_string(),
            name: email.split('@').next().unwrap_or_default().to_string(),
            password: TEST_PASSWORD.to_string(),
            is_super_admin: super_admin,
        }).await.expect("Failed to create user")
    }

    /// Provisions a tenant, optionally with `admin_email` as its TENANT_ADMIN.
    pub async fn provision(&self, slug: &str, admin_email: Option<&str>) -> Tenant {
        let (tenant, _) = self.state.provisioning.provision_tenant(NewTenant {
            name: format!("{} Inc", slug),
            slug: slug.to_string(),
            logo_url: None,
            primary_color: None,
            admin_email: admin_email.map(str::to_string),
        }).await.expect("Failed to provision tenant");
        tenant
    }

    pub fn session(user: &User) -> Session {
        Session::new(user.id.clone(), user.is_super_admin)
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthHeaders {
        let payload = serde_json::json!({
            "email": email,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start+end].to_string();

        let body_json = parse_body(response).await;
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token
        }
    }

    /// Sends a request addressed to `host`, authenticated when `auth` is given.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        host: &str,
        auth: Option<&AuthHeaders>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::HOST, host);

        if let Some(auth) = auth {
            builder = builder
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

/// Config with the checked-in test keys.
pub fn test_config(database_url: &str, mode: ExecutionMode) -> Config {
    let priv_key_pem = include_str!("../tests/keys/test_private.pem");
    let pub_key_pem = include_str!("../tests/keys/test_public.pem");

    Config {
        database_url: database_url.to_string(),
        port: 0,
        mode,
        jwt_secret_key: priv_key_pem.to_string(),
        jwt_public_key: pub_key_pem.to_string(),
        auth_issuer: "test-issuer".to_string(),
        sign_in_path: "/login".to_string(),
        landing_path: "/".to_string(),
    }
}

pub async fn parse_body(response: Response) -> Value {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        panic!("Response body is empty. Status: {}", status);
    }
    match serde_json::from_slice(&bytes) {
        Ok(v) => v,
        Err(e) => panic!("Failed to parse JSON: {:?}. Status: {}. Body: {:?}", e, status, String::from_utf8_lossy(&bytes))
    }
}
