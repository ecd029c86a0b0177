use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{admin, auth, feature, health, member, permission, site, tenant};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me))
        .route("/api/v1/auth/password", put(auth::change_password))

        // Public site
        .route("/api/v1/site", get(site::get_site))

        // Application surface
        .route("/api/v1/tenant", get(tenant::get_current_tenant))
        .route("/api/v1/navigation", get(tenant::navigation))
        .route("/api/v1/modules/{key}", get(tenant::module_entry))
        .route("/api/v1/features", get(feature::list_features))
        .route("/api/v1/features/{key}", get(feature::get_feature))

        // Permissions & members
        .route("/api/v1/permissions", get(permission::list_catalog))
        .route("/api/v1/me/permissions", get(permission::my_permissions))
        .route("/api/v1/members", get(member::list_members).post(member::add_member))
        .route("/api/v1/members/{id}", delete(member::delete_member))
        .route("/api/v1/members/{id}/role", put(member::set_member_role))
        .route("/api/v1/members/{id}/permissions", get(permission::get_member_permissions).put(permission::replace_member_permissions))

        // Platform administration
        .route("/api/v1/admin/tenants", post(admin::provision_tenant))
        .route("/api/v1/admin/tenants/{tenant_id}", get(admin::get_tenant).put(admin::update_tenant))
        .route("/api/v1/admin/tenants/{tenant_id}/status", put(admin::set_tenant_status))
        .route("/api/v1/admin/tenants/{tenant_id}/domains", get(admin::list_domains).post(admin::add_domain))
        .route("/api/v1/admin/domains/{domain_id}", delete(admin::remove_domain))
        .route("/api/v1/admin/tenants/{tenant_id}/features", get(admin::list_tenant_features))
        .route("/api/v1/admin/tenants/{tenant_id}/features/{key}", put(admin::set_feature))
        .route("/api/v1/admin/tenants/{tenant_id}/features/{key}/toggle", post(admin::toggle_feature))
        .route("/api/v1/admin/tenants/{tenant_id}/features/{key}/config", put(admin::set_feature_config))
        .route("/api/v1/admin/users", post(admin::create_user))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        tenant_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}