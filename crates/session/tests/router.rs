use std::sync::Arc;

use serde_json::json;
use url::Url;

use atlas_client::testing::{Scripted, ScriptedTransport};
use atlas_client::{ApiEnvelope, Method, ToastQueue};
use atlas_session::auth_store::USER_PATH;
use atlas_session::rbac_store::PERMISSIONS_PATH;
use atlas_session::{GuardConfig, Navigation, NavigationOutcome, RedirectReason, RouteTable, SessionContext};

fn session(transport: &Arc<ScriptedTransport>) -> SessionContext {
    SessionContext::new(
        transport.clone(),
        Arc::new(ToastQueue::default()),
        GuardConfig::for_origin(Url::parse("https://erp.example.com").unwrap()),
    )
}

fn sign_in(transport: &ScriptedTransport, permissions: serde_json::Value) {
    transport
        .reply(
            Method::Get,
            USER_PATH,
            ApiEnvelope::ok(json!({ "id": 3, "name": "Lin", "email": "lin@example.com" })),
        )
        .reply(Method::Get, PERMISSIONS_PATH, ApiEnvelope::ok(permissions));
}

#[tokio::test(start_paused = true)]
async fn renders_permitted_page_with_params() {
    let transport = Arc::new(ScriptedTransport::new());
    sign_in(&transport, json!(["vendors.read"]));
    let router = session(&transport).router(RouteTable::erp());

    let outcome = router.navigate(&Navigation::to("/vendors/12")).await;
    match outcome {
        NavigationOutcome::Render { route, params } => {
            assert_eq!(route, "vendor");
            assert_eq!(params["id"], "12");
        }
        other => panic!("expected render, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn unknown_path_is_not_found() {
    let transport = Arc::new(ScriptedTransport::new());
    let router = session(&transport).router(RouteTable::erp());

    assert_eq!(router.navigate(&Navigation::to("/nowhere")).await, NavigationOutcome::NotFound);
    assert_eq!(transport.calls(Method::Get, USER_PATH), 0);
}

#[tokio::test(start_paused = true)]
async fn protected_page_without_session_goes_to_login() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.fail(Method::Get, USER_PATH, Scripted::Unauthenticated);
    let router = session(&transport).router(RouteTable::erp());

    match router.navigate(&Navigation::to("/dashboard")).await {
        NavigationOutcome::Redirect(redirect) => {
            assert_eq!(redirect.to, "/login");
            assert_eq!(redirect.reason, RedirectReason::Unauthenticated);
        }
        other => panic!("expected redirect, got {other:?}"),
    }

    match router.navigate(&Navigation::to("/login")).await {
        NavigationOutcome::Render { route, .. } => assert_eq!(route, "login"),
        other => panic!("expected render, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn rbac_pages_need_manage_permission() {
    let transport = Arc::new(ScriptedTransport::new());
    sign_in(&transport, json!(["vendors.read"]));
    let router = session(&transport).router(RouteTable::erp());

    let outcome = router
        .navigate(&Navigation::to("/roles").from("https://erp.example.com/vendors"))
        .await;
    match outcome {
        NavigationOutcome::Redirect(redirect) => {
            assert_eq!(redirect.to, "/vendors");
            assert!(redirect.replace);
        }
        other => panic!("expected redirect, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn outcome_serializes_for_the_cli() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.fail(Method::Get, USER_PATH, Scripted::Unauthenticated);
    let router = session(&transport).router(RouteTable::erp());

    let outcome = router.navigate(&Navigation::to("/profile")).await;
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["outcome"], "redirect");
    assert_eq!(value["to"], "/login");
    assert_eq!(value["reason"]["kind"], "unauthenticated");
}
