use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::time::Instant;
use url::Url;

use atlas_auth::Permission;
use atlas_client::testing::{Scripted, ScriptedTransport};
use atlas_client::{ApiEnvelope, Method, NotificationLevel, ToastQueue};
use atlas_session::auth_store::USER_PATH;
use atlas_session::rbac_store::PERMISSIONS_PATH;
use atlas_session::{Credentials, GuardConfig, GuardOutcome, LoginOutcome, Navigation, RedirectReason, SessionContext};

const ORIGIN: &str = "https://erp.example.com";

struct Harness {
    transport: Arc<ScriptedTransport>,
    toasts: Arc<ToastQueue>,
    session: SessionContext,
}

impl Harness {
    fn new() -> Self {
        let transport = Arc::new(ScriptedTransport::new());
        let toasts = Arc::new(ToastQueue::default());
        let config = GuardConfig::for_origin(Url::parse(ORIGIN).unwrap());
        let session = SessionContext::new(transport.clone(), toasts.clone(), config);
        Self {
            transport,
            toasts,
            session,
        }
    }

    fn signed_in(self, permissions: serde_json::Value) -> Self {
        self.transport
            .reply(
                Method::Get,
                USER_PATH,
                ApiEnvelope::ok(json!({ "id": 1, "name": "Ada", "email": "ada@example.com" })),
            )
            .reply(Method::Get, PERMISSIONS_PATH, ApiEnvelope::ok(permissions));
        self
    }
}

fn payroll() -> Permission {
    Permission::new("payroll.read")
}

#[tokio::test(start_paused = true)]
async fn failed_session_fetch_redirects_to_login() {
    let h = Harness::new();
    h.transport
        .fail(Method::Get, USER_PATH, Scripted::Unavailable("connection refused".into()));

    let outcome = h.session.guards().require_auth().await;

    let redirect = outcome.redirect().expect("should redirect");
    assert_eq!(redirect.to, "/login");
    assert_eq!(redirect.reason, RedirectReason::Unauthenticated);
    assert!(!redirect.replace);
    assert!(h.session.auth.error().is_some());
}

#[tokio::test(start_paused = true)]
async fn missing_session_short_circuits_permission_check() {
    let h = Harness::new();
    h.transport.fail(Method::Get, USER_PATH, Scripted::Unauthenticated);

    let outcome = h
        .session
        .guards()
        .require_permission(&payroll(), &Navigation::to("/payroll"))
        .await;

    assert_eq!(outcome.redirect().map(|r| r.to.as_str()), Some("/login"));
    assert_eq!(h.transport.calls(Method::Get, PERMISSIONS_PATH), 0);
    assert!(h.toasts.is_empty());
}

#[tokio::test(start_paused = true)]
async fn granted_permission_proceeds() {
    let h = Harness::new().signed_in(json!(["payroll.read", "employees.read"]));

    let outcome = h
        .session
        .guards()
        .require_permission(&payroll(), &Navigation::to("/payroll"))
        .await;

    assert_eq!(outcome, GuardOutcome::Proceed);
}

#[tokio::test(start_paused = true)]
async fn wildcard_grants_everything() {
    let h = Harness::new().signed_in(json!([{ "name": "*" }]));

    let outcome = h
        .session
        .guards()
        .require_permission(&Permission::new("rbac.manage"), &Navigation::to("/roles"))
        .await;

    assert!(outcome.is_proceed());
}

#[tokio::test(start_paused = true)]
async fn embedded_permissions_skip_the_permission_request() {
    let h = Harness::new();
    h.transport.reply(
        Method::Get,
        USER_PATH,
        ApiEnvelope::ok(json!({
            "id": 1,
            "name": "Ada",
            "email": "ada@example.com",
            "permissions": ["payroll.read"]
        })),
    );

    let outcome = h
        .session
        .guards()
        .require_permission(&payroll(), &Navigation::to("/payroll"))
        .await;

    assert!(outcome.is_proceed());
    assert_eq!(h.transport.calls(Method::Get, PERMISSIONS_PATH), 0);
}

#[tokio::test(start_paused = true)]
async fn denied_permission_redirects_to_same_origin_referrer() {
    let h = Harness::new().signed_in(json!(["employees.read"]));

    let navigation = Navigation::to("/payroll").from(format!("{ORIGIN}/employees?page=2"));
    let outcome = h.session.guards().require_permission(&payroll(), &navigation).await;

    let redirect = outcome.redirect().expect("should redirect");
    assert_eq!(redirect.to, "/employees?page=2");
    assert!(redirect.replace);
    assert_eq!(redirect.reason, RedirectReason::Forbidden(payroll()));

    let toasts = h.toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, NotificationLevel::Warning);
    assert!(toasts[0].message.contains("view payroll"));
}

#[tokio::test(start_paused = true)]
async fn denied_permission_ignores_foreign_and_auth_referrers() {
    let h = Harness::new().signed_in(json!(["employees.read"]));
    let guards = h.session.guards();

    for referrer in [
        "https://evil.example.net/employees".to_string(),
        format!("{ORIGIN}/login"),
        format!("{ORIGIN}/payroll"),
    ] {
        let navigation = Navigation::to("/payroll").from(referrer.clone());
        let outcome = guards.require_permission(&payroll(), &navigation).await;
        assert_eq!(
            outcome.redirect().map(|r| r.to.as_str()),
            Some("/dashboard"),
            "referrer {referrer}"
        );
    }

    let outcome = guards
        .require_permission(&payroll(), &Navigation::to("/payroll"))
        .await;
    assert_eq!(outcome.redirect().map(|r| r.to.as_str()), Some("/dashboard"));
}

#[tokio::test(start_paused = true)]
async fn empty_permission_set_fails_closed_after_about_a_second() {
    let h = Harness::new().signed_in(json!([]));

    let started = Instant::now();
    let outcome = h
        .session
        .guards()
        .require_permission(&payroll(), &Navigation::to("/payroll"))
        .await;
    let waited = started.elapsed();

    assert!(!outcome.is_proceed());
    assert!(waited >= Duration::from_secs(1), "waited {waited:?}");
    assert!(waited < Duration::from_millis(1200), "waited {waited:?}");
}

#[tokio::test(start_paused = true)]
async fn failed_permission_fetch_fails_closed() {
    let h = Harness::new();
    h.transport
        .reply(
            Method::Get,
            USER_PATH,
            ApiEnvelope::ok(json!({ "id": 1, "name": "Ada", "email": "ada@example.com" })),
        )
        .fail(Method::Get, PERMISSIONS_PATH, Scripted::Status(500, "boom".into()));

    let outcome = h
        .session
        .guards()
        .require_permission(&payroll(), &Navigation::to("/payroll"))
        .await;

    assert!(!outcome.is_proceed());
    assert!(h.session.rbac.error().is_some());
}

#[tokio::test(start_paused = true)]
async fn slow_permissions_arriving_within_budget_are_honoured() {
    let h = Harness::new();
    h.transport
        .reply(
            Method::Get,
            USER_PATH,
            ApiEnvelope::ok(json!({ "id": 1, "name": "Ada", "email": "ada@example.com" })),
        )
        .reply_after(
            Method::Get,
            PERMISSIONS_PATH,
            Duration::from_millis(600),
            ApiEnvelope::ok(json!(["payroll.read"])),
        );

    let outcome = h
        .session
        .guards()
        .require_permission(&payroll(), &Navigation::to("/payroll"))
        .await;

    assert!(outcome.is_proceed());
}

#[tokio::test(start_paused = true)]
async fn concurrent_first_navigations_share_one_session_fetch() {
    let h = Harness::new();
    h.transport.reply_after(
        Method::Get,
        USER_PATH,
        Duration::from_millis(200),
        ApiEnvelope::ok(json!({ "id": 1, "name": "Ada", "email": "ada@example.com", "permissions": ["*"] })),
    );
    let guards = h.session.guards();

    let (a, b, c) = tokio::join!(
        guards.require_auth(),
        guards.require_auth(),
        guards.redirect_if_authenticated()
    );

    assert!(a.is_proceed());
    assert!(b.is_proceed());
    assert_eq!(c.redirect().map(|r| r.reason.clone()), Some(RedirectReason::AlreadyAuthenticated));
    assert_eq!(h.transport.calls(Method::Get, USER_PATH), 1);
}

#[tokio::test(start_paused = true)]
async fn cached_session_is_not_refetched() {
    let h = Harness::new().signed_in(json!(["*"]));
    let guards = h.session.guards();

    assert!(guards.require_auth().await.is_proceed());
    assert!(guards.require_auth().await.is_proceed());
    assert_eq!(h.transport.calls(Method::Get, USER_PATH), 1);
}

#[tokio::test(start_paused = true)]
async fn hanging_session_fetch_times_out_to_login() {
    let h = Harness::new();
    h.transport.fail(Method::Get, USER_PATH, Scripted::Hang);

    let started = Instant::now();
    let outcome = h.session.guards().require_auth().await;

    assert_eq!(outcome.redirect().map(|r| r.to.as_str()), Some("/login"));
    assert!(started.elapsed() >= Duration::from_secs(15));
}

#[tokio::test(start_paused = true)]
async fn guest_pages_redirect_signed_in_users_to_landing() {
    let h = Harness::new().signed_in(json!(["*"]));

    let outcome = h.session.guards().redirect_if_authenticated().await;
    let redirect = outcome.redirect().expect("should redirect");
    assert_eq!(redirect.to, "/dashboard");
    assert!(redirect.replace);
}

#[tokio::test(start_paused = true)]
async fn guest_pages_proceed_without_session() {
    let h = Harness::new();
    h.transport.fail(Method::Get, USER_PATH, Scripted::Unauthenticated);

    assert!(h.session.guards().redirect_if_authenticated().await.is_proceed());
}

#[tokio::test(start_paused = true)]
async fn logout_revokes_access() {
    let h = Harness::new().signed_in(json!(["payroll.read"]));
    // The next session fetch, after logout, finds no session.
    h.transport
        .fail(Method::Get, USER_PATH, Scripted::Unauthenticated)
        .reply(Method::Post, "/api/logout", ApiEnvelope::ok_empty());
    let guards = h.session.guards();

    assert!(
        guards
            .require_permission(&payroll(), &Navigation::to("/payroll"))
            .await
            .is_proceed()
    );

    assert!(h.session.auth.logout().await);
    assert!(!h.session.rbac.has_permission("payroll.read"));

    let outcome = guards
        .require_permission(&payroll(), &Navigation::to("/payroll"))
        .await;
    assert_eq!(outcome.redirect().map(|r| r.to.as_str()), Some("/login"));
    assert_eq!(h.transport.calls(Method::Get, USER_PATH), 2);
}

#[tokio::test(start_paused = true)]
async fn session_fetch_finishing_after_logout_does_not_sign_back_in() {
    let h = Harness::new();
    h.transport
        .reply_after(
            Method::Get,
            USER_PATH,
            Duration::from_millis(200),
            ApiEnvelope::ok(json!({ "id": 1, "name": "Ada", "email": "ada@example.com", "permissions": ["*"] })),
        )
        .fail(Method::Get, USER_PATH, Scripted::Unauthenticated)
        .reply(Method::Post, "/api/logout", ApiEnvelope::ok_empty());

    assert!(h.session.auth.trigger_fetch());
    tokio::time::sleep(Duration::from_millis(50)).await;
    h.session.auth.logout().await;
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert!(!h.session.auth.is_authenticated());
    assert!(!h.session.rbac.has_permission("rbac.manage"));

    let outcome = h
        .session
        .guards()
        .require_permission(&Permission::new("rbac.manage"), &Navigation::to("/roles"))
        .await;
    assert_eq!(outcome.redirect().map(|r| r.to.as_str()), Some("/login"));
}

#[tokio::test(start_paused = true)]
async fn new_user_is_not_authorized_by_previous_users_permissions() {
    let h = Harness::new();
    h.transport
        .reply(
            Method::Get,
            USER_PATH,
            ApiEnvelope::ok(json!({ "id": 1, "name": "Admin", "email": "admin@example.com", "permissions": ["*"] })),
        )
        .reply(
            Method::Post,
            "/api/login",
            ApiEnvelope::ok(json!({ "id": 2, "name": "Clerk", "email": "clerk@example.com" })),
        )
        .reply_after(
            Method::Get,
            PERMISSIONS_PATH,
            Duration::from_millis(500),
            ApiEnvelope::ok(json!(["vendors.read"])),
        );
    let guards = h.session.guards();
    let roles = Permission::new("rbac.manage");

    h.session.auth.fetch_user().await;
    assert!(guards.require_permission(&roles, &Navigation::to("/roles")).await.is_proceed());

    let outcome = h
        .session
        .auth
        .login(&Credentials {
            email: "clerk@example.com".into(),
            password: "secret".into(),
            remember: false,
        })
        .await;
    assert!(matches!(outcome, LoginOutcome::Authenticated(_)));

    let outcome = guards.require_permission(&roles, &Navigation::to("/roles")).await;
    assert_eq!(outcome.redirect().map(|r| r.reason.clone()), Some(RedirectReason::Forbidden(roles.clone())));

    let outcome = guards
        .require_permission(&Permission::new("vendors.read"), &Navigation::to("/vendors"))
        .await;
    assert!(outcome.is_proceed());
}
