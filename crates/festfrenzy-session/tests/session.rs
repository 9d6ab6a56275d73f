//! Integration tests: session context and gate over a scripted backend.

use std::sync::Arc;

use festfrenzy_protocol::{ApiClient, Credential, LoginForm};
use festfrenzy_session::{
    CredentialStore, FileStore, GatePolicy, GateState, MemoryStore, Navigation,
    Route, SessionContext, SessionError, SessionGate, Verdict, SIGN_IN_FAILED,
};
use festfrenzy_transport::{Method, MockTransport};
use serde_json::json;

fn context<S: CredentialStore>(store: S) -> (Arc<MockTransport>, SessionContext<S, MockTransport>) {
    let mock = Arc::new(MockTransport::new());
    let api = ApiClient::from_shared(Arc::clone(&mock));
    (mock, SessionContext::new(store, api))
}

fn form(email: &str, password: &str) -> LoginForm {
    LoginForm {
        email: email.into(),
        password: password.into(),
    }
}

fn script_me(mock: &MockTransport, role: &str) {
    mock.respond(
        Method::Get,
        "/api/users/me",
        200,
        json!({"id": 2, "name": "Neha Shah", "email": "neha@college.edu",
               "role": role, "is_approved": true}),
    );
}

// =========================================================================
// Sign-in
// =========================================================================

#[tokio::test]
async fn test_sign_in_success_stores_token_and_goes_to_dashboard() {
    let (mock, ctx) = context(MemoryStore::new());
    mock.respond(
        Method::Post,
        "/api/organizer/login",
        200,
        json!({"access_token": "tok-42", "token_type": "bearer"}),
    );

    let nav = ctx.sign_in(&form("spark@college.edu", "pw")).await.expect("should succeed");

    assert_eq!(nav, Navigation::new(Route::OrganizerDashboard));
    assert_eq!(ctx.credential(), Some(Credential::new("tok-42")));
}

#[tokio::test]
async fn test_sign_in_rejected_shows_server_detail() {
    let (mock, ctx) = context(MemoryStore::new());
    mock.respond(
        Method::Post,
        "/api/organizer/login",
        401,
        json!({"detail": "Incorrect email or password"}),
    );

    let err = ctx.sign_in(&form("a@b.c", "nope")).await.expect_err("should fail");

    assert_eq!(err.message_or(SIGN_IN_FAILED), "Incorrect email or password");
    assert!(ctx.credential().is_none());
}

#[tokio::test]
async fn test_sign_in_network_failure_uses_generic_message() {
    let (mock, ctx) = context(MemoryStore::new());
    mock.fail(Method::Post, "/api/organizer/login", "connection refused");

    let err = ctx.sign_in(&form("a@b.c", "pw")).await.expect_err("should fail");

    assert_eq!(err.message_or(SIGN_IN_FAILED), SIGN_IN_FAILED);
}

#[tokio::test]
async fn test_sign_in_empty_field_sends_nothing() {
    let (mock, ctx) = context(MemoryStore::new());

    let err = ctx.sign_in(&form("  ", "pw")).await.expect_err("should fail");

    assert!(matches!(err, SessionError::InvalidInput(_)));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_sign_in_overlong_password_sends_nothing() {
    let (mock, ctx) = context(MemoryStore::new());
    let password = "x".repeat(73);

    let err = ctx.sign_in(&form("a@b.c", &password)).await.expect_err("should fail");

    assert_eq!(err.message_or(SIGN_IN_FAILED), "Password must be 72 characters or less.");
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_sign_in_with_file_store_persists_token() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (mock, ctx) = context(FileStore::new(dir.path()));
    mock.respond(
        Method::Post,
        "/api/organizer/login",
        200,
        json!({"access_token": "disk-token", "token_type": "bearer"}),
    );

    ctx.sign_in(&form("a@b.c", "pw")).await.expect("should succeed");

    let reopened = FileStore::new(dir.path());
    assert_eq!(reopened.load().expect("load"), Some(Credential::new("disk-token")));
}

// =========================================================================
// Sign-out
// =========================================================================

#[tokio::test]
async fn test_sign_out_clears_and_goes_to_login() {
    let (_mock, ctx) = context(MemoryStore::with_credential(Credential::new("tok")));

    let nav = ctx.sign_out().expect("should succeed");

    assert_eq!(nav, Navigation::new(Route::Login));
    assert!(ctx.credential().is_none());
}

// =========================================================================
// Gate through the real client
// =========================================================================

#[tokio::test]
async fn test_admit_sends_stored_credential_as_bearer() {
    let (mock, ctx) = context(MemoryStore::with_credential(Credential::new("tok-7")));
    script_me(&mock, "organizer");
    let mut gate = SessionGate::new(GatePolicy::organizer_dashboard());

    let verdict = ctx.admit(&mut gate).await;

    assert!(matches!(verdict, Verdict::Admit(_)));
    assert_eq!(gate.state(), GateState::Authorized);
    let sent = mock.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].path, "/api/users/me");
    assert_eq!(sent[0].bearer.as_deref(), Some("tok-7"));
}

#[tokio::test]
async fn test_admit_without_credential_makes_no_request() {
    let (mock, ctx) = context(MemoryStore::new());
    let mut gate = SessionGate::new(GatePolicy::admin_dashboard());

    let verdict = ctx.admit(&mut gate).await;

    assert_eq!(verdict, Verdict::Navigate(Navigation::new(Route::Login)));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_admit_admin_on_organizer_page_shows_no_error() {
    let (mock, ctx) = context(MemoryStore::with_credential(Credential::new("tok")));
    script_me(&mock, "admin");
    let mut gate = SessionGate::new(GatePolicy::organizer_dashboard());

    let verdict = ctx.admit(&mut gate).await;

    let Verdict::Navigate(nav) = verdict else {
        panic!("expected redirect");
    };
    assert_eq!(nav.to, Route::AdminDashboard);
    assert_eq!(nav.notice, None);
}
