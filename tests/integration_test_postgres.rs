mod common;

use common::test_config;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tenancy_backend::{
    config::ExecutionMode,
    domain::models::{domain::SurfaceKind, membership::TenantRole},
    domain::services::provisioning::{NewTenant, NewUser},
    infra::factory::{postgres_repositories, run_postgres_migrations},
    state::AppState,
};
use uuid::Uuid;

/// Runs against the database in `TEST_POSTGRES_URL`; skipped when it is unset.
async fn postgres_state() -> Option<Arc<AppState>> {
    let Ok(url) = std::env::var("TEST_POSTGRES_URL") else {
        eprintln!("TEST_POSTGRES_URL not set, skipping PostgreSQL adapter test");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("Failed to connect to test postgres");
    run_postgres_migrations(&pool).await.expect("Failed to migrate test postgres");

    let state = AppState::new(test_config(&url, ExecutionMode::Production), postgres_repositories(pool))
        .expect("Failed to build state");
    Some(Arc::new(state))
}

#[tokio::test]
async fn test_postgres_adapters_cover_the_tenancy_flow() {
    let Some(state) = postgres_state().await else {
        return;
    };

    // Unique names so reruns against the same database do not collide
    let suffix = Uuid::new_v4().simple().to_string()[..12].to_string();
    let slug = format!("pg-{}", suffix);
    let admin_email = format!("admin-{}@acme.com", suffix);
    let member_email = format!("member-{}@acme.com", suffix);

    let admin = state.provisioning.create_user(NewUser {
        email: admin_email.clone(),
        name: "Admin".into(),
        password: "securepassword123".into(),
        is_super_admin: false,
    }).await.unwrap();
    let member = state.provisioning.create_user(NewUser {
        email: member_email,
        name: "Member".into(),
        password: "securepassword123".into(),
        is_super_admin: false,
    }).await.unwrap();

    let (tenant, admin_membership) = state.provisioning.provision_tenant(NewTenant {
        name: "PG Tenant".into(),
        slug: slug.clone(),
        logo_url: None,
        primary_color: None,
        admin_email: Some(admin_email),
    }).await.unwrap();
    assert_eq!(admin_membership.map(|m| m.role), Some(TenantRole::TenantAdmin));

    // Resolution through both subdomain and explicit mapping
    let host = format!("{}.example.com", slug);
    let resolved = state.resolver.resolve_tenant(Some(&host), SurfaceKind::App).await.unwrap();
    assert_eq!(resolved.map(|t| t.id), Some(tenant.id.clone()));

    let mapped = format!("portal-{}.acme.io", suffix);
    let domain = state.domains.add_domain(&tenant.id, &mapped, SurfaceKind::App).await.unwrap();
    assert!(state.domains.add_domain(&tenant.id, &mapped, SurfaceKind::App).await.is_err());

    // Guard, membership and grants
    let session = tenancy_backend::domain::models::session::Session::new(admin.id.clone(), false);
    let ctx = state.guard.require_membership(Some(&session), Some(&mapped), SurfaceKind::App).await.unwrap();
    let tenant_user = state.provisioning.add_member(&tenant.id, &member.id, TenantRole::Custom).await.unwrap();

    let stored = state.permissions
        .replace_permissions(&ctx, &tenant_user.id, ["crm.contact.read", "not.a.key"])
        .await
        .unwrap();
    assert_eq!(stored.into_iter().collect::<Vec<_>>(), vec!["crm.contact.read"]);
    assert!(state.permissions.has_permission(&member.id, &tenant.id, "crm.contact.read").await.unwrap());

    let members = state.membership_repo.list(&ctx.scope()).await.unwrap();
    assert_eq!(members.len(), 2);
    assert!(state.membership_repo.delete(&ctx.scope(), &tenant_user.id).await.unwrap());

    // Feature flag upserts
    assert!(state.features.is_feature_enabled(&tenant.id, "crm").await.unwrap());
    assert!(!state.features.toggle_feature(&tenant.id, "crm").await.unwrap().enabled);
    assert!(state.features.toggle_feature(&tenant.id, "payroll").await.unwrap().enabled);
    let configured = state.features
        .set_feature_config(&tenant.id, "crm", Some(serde_json::json!({"pipeline": "b2b"})))
        .await
        .unwrap();
    assert!(!configured.enabled);

    // Refresh token storage
    let (_, refresh, _) = state.auth_service.login(&admin).await.unwrap();
    let record = state.auth_service.find_refresh_record(&refresh).await.unwrap().unwrap();
    assert_eq!(record.user_id, admin.id);
    state.auth_service.revoke_all(&admin.id).await.unwrap();
    assert!(state.auth_service.find_refresh_record(&refresh).await.unwrap().is_none());

    state.domains.remove_domain(&domain.id).await.unwrap();
}
