mod common;

use common::TestApp;
use std::sync::{atomic::{AtomicBool, Ordering}, Arc};
use tenancy_backend::domain::models::{
    context::TenantContext, domain::SurfaceKind, membership::{TenantRole, TenantUser}, user::User,
};
use tenancy_backend::error::AppError;

async fn context_for(app: &TestApp, user: &User, host: &str) -> TenantContext {
    app.state.guard
        .require_membership(Some(&TestApp::session(user)), Some(host), SurfaceKind::App)
        .await
        .expect("guard rejected test user")
}

async fn add_member(app: &TestApp, tenant_id: &str, user: &User, role: TenantRole) -> TenantUser {
    app.state.provisioning.add_member(tenant_id, &user.id, role).await.unwrap()
}

#[tokio::test]
async fn test_tenant_admin_holds_every_catalog_key() {
    let app = TestApp::new().await;
    let ann = app.create_user("ann@acme.com", false).await;
    let acme = app.provision("acme", Some("ann@acme.com")).await;

    let engine = &app.state.permissions;
    assert!(engine.has_permission(&ann.id, &acme.id, "finance.invoice.delete").await.unwrap());
    assert!(engine.has_permission(&ann.id, &acme.id, "settings.member.manage").await.unwrap());

    let keys = engine.list_user_permission_keys(&ann.id, &acme.id).await.unwrap();
    let catalog = engine.catalog().await.unwrap();
    assert_eq!(keys.len(), catalog.len());
    assert!(keys.contains("website.page.publish"));
}

#[tokio::test]
async fn test_tenant_user_holds_only_granted_keys() {
    let app = TestApp::new().await;
    let ann = app.create_user("ann@acme.com", false).await;
    let bob = app.create_user("bob@acme.com", false).await;
    let acme = app.provision("acme", Some("ann@acme.com")).await;
    let bob_member = add_member(&app, &acme.id, &bob, TenantRole::TenantUser).await;

    let engine = &app.state.permissions;
    assert!(!engine.has_permission(&bob.id, &acme.id, "crm.contact.read").await.unwrap());
    assert!(engine.list_user_permission_keys(&bob.id, &acme.id).await.unwrap().is_empty());

    let ctx = context_for(&app, &ann, "acme.example.com").await;
    let stored = engine.replace_permissions(&ctx, &bob_member.id, ["crm.contact.read", "crm.lead.read"]).await.unwrap();
    assert_eq!(stored.iter().cloned().collect::<Vec<_>>(), vec!["crm.contact.read", "crm.lead.read"]);

    assert!(engine.has_permission(&bob.id, &acme.id, "crm.contact.read").await.unwrap());
    assert!(engine.has_permission(&bob.id, &acme.id, "CRM.Lead.Read").await.unwrap());
    assert!(!engine.has_permission(&bob.id, &acme.id, "crm.contact.delete").await.unwrap());
    assert!(!engine.has_permission(&bob.id, &acme.id, "finance.invoice.read").await.unwrap());
}

#[tokio::test]
async fn test_replace_is_total_and_empty_clears() {
    let app = TestApp::new().await;
    let ann = app.create_user("ann@acme.com", false).await;
    let bob = app.create_user("bob@acme.com", false).await;
    let acme = app.provision("acme", Some("ann@acme.com")).await;
    let bob_member = add_member(&app, &acme.id, &bob, TenantRole::Custom).await;

    let engine = &app.state.permissions;
    let ctx = context_for(&app, &ann, "acme.example.com").await;

    engine.replace_permissions(&ctx, &bob_member.id, ["hr.employee.read", "hr.leave.read"]).await.unwrap();
    let second = engine.replace_permissions(&ctx, &bob_member.id, ["inventory.stock.read"]).await.unwrap();
    assert_eq!(second.len(), 1);
    assert!(!engine.has_permission(&bob.id, &acme.id, "hr.employee.read").await.unwrap());

    let cleared = engine.replace_permissions(&ctx, &bob_member.id, Vec::<String>::new()).await.unwrap();
    assert!(cleared.is_empty());
    assert!(engine.list_user_permission_keys(&bob.id, &acme.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_role_round_trip_restores_custom_grants() {
    let app = TestApp::new().await;
    let ann = app.create_user("ann@acme.com", false).await;
    let bob = app.create_user("bob@acme.com", false).await;
    let acme = app.provision("acme", Some("ann@acme.com")).await;
    let bob_member = add_member(&app, &acme.id, &bob, TenantRole::Custom).await;

    let engine = &app.state.permissions;
    let ctx = context_for(&app, &ann, "acme.example.com").await;
    engine.replace_permissions(&ctx, &bob_member.id, ["crm.deal.read"]).await.unwrap();

    let promoted = engine.set_role(&ctx, &bob_member.id, TenantRole::TenantAdmin).await.unwrap();
    assert_eq!(promoted.role, TenantRole::TenantAdmin);
    assert!(engine.has_permission(&bob.id, &acme.id, "finance.payment.create").await.unwrap());

    engine.set_role(&ctx, &bob_member.id, TenantRole::Custom).await.unwrap();
    let keys = engine.list_user_permission_keys(&bob.id, &acme.id).await.unwrap();
    assert_eq!(keys.into_iter().collect::<Vec<_>>(), vec!["crm.deal.read"]);
}

#[tokio::test]
async fn test_cross_tenant_mutation_is_rejected() {
    let app = TestApp::new().await;
    let ann = app.create_user("ann@acme.com", false).await;
    let zed = app.create_user("zed@beta.com", false).await;
    let mallory = app.create_user("mallory@beta.com", false).await;
    app.provision("acme", Some("ann@acme.com")).await;
    let beta = app.provision("beta", Some("zed@beta.com")).await;
    let victim = add_member(&app, &beta.id, &mallory, TenantRole::Custom).await;

    let engine = &app.state.permissions;
    let beta_ctx = context_for(&app, &zed, "beta.example.com").await;
    engine.replace_permissions(&beta_ctx, &victim.id, ["crm.contact.read"]).await.unwrap();

    let acme_ctx = context_for(&app, &ann, "acme.example.com").await;
    let replaced = engine.replace_permissions(&acme_ctx, &victim.id, ["settings.tenant.manage"]).await;
    assert!(matches!(replaced, Err(AppError::Forbidden(_))));

    let role = engine.set_role(&acme_ctx, &victim.id, TenantRole::TenantAdmin).await;
    assert!(matches!(role, Err(AppError::Forbidden(_))));

    let keys = engine.list_user_permission_keys(&mallory.id, &beta.id).await.unwrap();
    assert_eq!(keys.into_iter().collect::<Vec<_>>(), vec!["crm.contact.read"]);
}

#[tokio::test]
async fn test_unknown_and_malformed_keys_are_ignored() {
    let app = TestApp::new().await;
    let ann = app.create_user("ann@acme.com", false).await;
    let bob = app.create_user("bob@acme.com", false).await;
    let acme = app.provision("acme", Some("ann@acme.com")).await;
    let bob_member = add_member(&app, &acme.id, &bob, TenantRole::Custom).await;

    let engine = &app.state.permissions;
    let ctx = context_for(&app, &ann, "acme.example.com").await;
    let stored = engine
        .replace_permissions(&ctx, &bob_member.id, ["crm.contact.read", "made.up.key", "bad", "crm..read", "crm.contact.read"])
        .await
        .unwrap();

    assert_eq!(stored.into_iter().collect::<Vec<_>>(), vec!["crm.contact.read"]);
    assert!(!engine.has_permission(&bob.id, &acme.id, "made.up.key").await.unwrap());
}

#[tokio::test]
async fn test_non_member_holds_nothing() {
    let app = TestApp::new().await;
    let eve = app.create_user("eve@evil.com", false).await;
    let acme = app.provision("acme", None).await;

    let engine = &app.state.permissions;
    assert!(!engine.has_permission(&eve.id, &acme.id, "crm.contact.read").await.unwrap());
    assert!(engine.list_user_permission_keys(&eve.id, &acme.id).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_readers_never_observe_a_half_replaced_grant_set() {
    let app = TestApp::new().await;
    let ann = app.create_user("ann@acme.com", false).await;
    let bob = app.create_user("bob@acme.com", false).await;
    let acme = app.provision("acme", Some("ann@acme.com")).await;
    let bob_member = add_member(&app, &acme.id, &bob, TenantRole::Custom).await;

    let ctx = context_for(&app, &ann, "acme.example.com").await;
    app.state.permissions.replace_permissions(&ctx, &bob_member.id, ["crm.contact.read"]).await.unwrap();

    let done = Arc::new(AtomicBool::new(false));
    let reader = {
        let engine = app.state.permissions.clone();
        let done = done.clone();
        let (user_id, tenant_id) = (bob.id.clone(), acme.id.clone());
        tokio::spawn(async move {
            let (mut reads, mut empty) = (0usize, 0usize);
            loop {
                let keys = engine.list_user_permission_keys(&user_id, &tenant_id).await.unwrap();
                reads += 1;
                if keys.is_empty() {
                    empty += 1;
                }
                if done.load(Ordering::SeqCst) {
                    break;
                }
            }
            (reads, empty)
        })
    };

    for i in 0..60 {
        let key = if i % 2 == 0 { "crm.lead.read" } else { "crm.contact.read" };
        let stored = app.state.permissions.replace_permissions(&ctx, &bob_member.id, [key]).await.unwrap();
        assert_eq!(stored.len(), 1);
        tokio::task::yield_now().await;
    }
    done.store(true, Ordering::SeqCst);

    let (reads, empty) = reader.await.unwrap();
    assert!(reads > 0);
    assert_eq!(empty, 0, "{} of {} reads saw an empty grant set", empty, reads);
}
