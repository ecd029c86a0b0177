mod common;

use common::TestApp;
use serde_json::json;
use tenancy_backend::domain::models::domain::SurfaceKind;
use tenancy_backend::error::AppError;

#[tokio::test]
async fn test_provisioning_seeds_default_modules_enabled() {
    let app = TestApp::new().await;
    let root = app.create_user("root@platform.io", true).await;
    let acme = app.provision("acme", None).await;

    let ctx = app.state.guard
        .require_membership(Some(&TestApp::session(&root)), Some("acme.example.com"), SurfaceKind::App)
        .await
        .unwrap();

    let features = app.state.features.list_features(&ctx.scope()).await.unwrap();
    let keys: Vec<_> = features.iter().map(|f| f.feature_key.as_str()).collect();
    assert_eq!(keys, vec!["crm", "finance", "hr", "inventory", "website"]);
    assert!(features.iter().all(|f| f.enabled));
    assert!(features.iter().all(|f| f.tenant_id == acme.id));
}

#[tokio::test]
async fn test_initialize_is_idempotent_and_keeps_edits() {
    let app = TestApp::new().await;
    let acme = app.provision("acme", None).await;
    let flags = &app.state.features;

    flags.set_feature(&acme.id, "finance", false).await.unwrap();

    let keys = vec!["crm".to_string(), "finance".to_string(), "analytics".to_string()];
    flags.initialize_features(&acme.id, &keys).await.unwrap();
    flags.initialize_features(&acme.id, &keys).await.unwrap();

    assert!(!flags.is_feature_enabled(&acme.id, "finance").await.unwrap());
    assert!(flags.is_feature_enabled(&acme.id, "analytics").await.unwrap());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tenant_features WHERE tenant_id = ?")
        .bind(&acme.id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 6);
}

#[tokio::test]
async fn test_toggle_flips_and_creates_missing_rows_enabled() {
    let app = TestApp::new().await;
    let acme = app.provision("acme", None).await;
    let flags = &app.state.features;

    assert!(!flags.is_feature_enabled(&acme.id, "payroll").await.unwrap());
    let created = flags.toggle_feature(&acme.id, "payroll").await.unwrap();
    assert!(created.enabled);

    let off = flags.toggle_feature(&acme.id, "payroll").await.unwrap();
    assert!(!off.enabled);
    let on = flags.toggle_feature(&acme.id, "Payroll").await.unwrap();
    assert!(on.enabled);
}

#[tokio::test]
async fn test_set_feature_is_idempotent() {
    let app = TestApp::new().await;
    let acme = app.provision("acme", None).await;
    let flags = &app.state.features;

    flags.set_feature(&acme.id, "hr", false).await.unwrap();
    flags.set_feature(&acme.id, "hr", false).await.unwrap();
    assert!(!flags.is_feature_enabled(&acme.id, "hr").await.unwrap());

    let fresh = flags.set_feature(&acme.id, "reports", true).await.unwrap();
    assert!(fresh.enabled);
}

#[tokio::test]
async fn test_config_is_stored_without_touching_enabled() {
    let app = TestApp::new().await;
    let acme = app.provision("acme", None).await;
    let flags = &app.state.features;

    let updated = flags.set_feature_config(&acme.id, "crm", Some(json!({"pipeline": "b2b"}))).await.unwrap();
    assert!(updated.enabled);
    assert_eq!(updated.config.map(|c| c.0), Some(json!({"pipeline": "b2b"})));
}

#[tokio::test]
async fn test_require_feature_hides_disabled_modules() {
    let app = TestApp::new().await;
    let root = app.create_user("root@platform.io", true).await;
    let acme = app.provision("acme", None).await;

    let ctx = app.state.guard
        .require_membership(Some(&TestApp::session(&root)), Some("acme.example.com"), SurfaceKind::App)
        .await
        .unwrap();
    let flags = &app.state.features;

    assert!(flags.require_feature(&ctx.scope(), "crm").await.is_ok());

    flags.set_feature(&acme.id, "crm", false).await.unwrap();
    assert!(matches!(flags.require_feature(&ctx.scope(), "crm").await, Err(AppError::NotFound(_))));
    assert!(matches!(flags.require_feature(&ctx.scope(), "nonexistent").await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_features_are_per_tenant() {
    let app = TestApp::new().await;
    let acme = app.provision("acme", None).await;
    let beta = app.provision("beta", None).await;
    let flags = &app.state.features;

    flags.toggle_feature(&acme.id, "website").await.unwrap();
    assert!(!flags.is_feature_enabled(&acme.id, "website").await.unwrap());
    assert!(flags.is_feature_enabled(&beta.id, "website").await.unwrap());
}
