//! Session lifecycle: silent restore, login, registration, logout.

mod support;

use dealfinder_core::error::DealfinderError;
use std::sync::atomic::Ordering;
use support::*;

#[tokio::test]
async fn restore_with_valid_token_establishes_session() {
    let h = harness_with_tokens(MemoryTokenStore::with_token(VALID_TOKEN));

    let restored = h.app.restore().await;

    assert!(restored.is_some());
    assert!(h.app.session().is_authenticated());
    assert_eq!(h.app.session().current().unwrap().display_name, "wanjiru");
    // The token survives for the next run
    assert!(h.tokens.stored().is_some());
}

#[tokio::test]
async fn restore_with_rejected_token_clears_it() {
    let h = harness_with_tokens(MemoryTokenStore::with_token("tok-expired"));

    let restored = h.app.restore().await;

    assert!(restored.is_none());
    assert!(!h.app.session().is_authenticated());
    assert!(h.tokens.stored().is_none());
}

#[tokio::test]
async fn restore_without_token_is_quiet() {
    let h = harness();

    assert!(h.app.restore().await.is_none());
    assert_eq!(h.user.network_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn login_persists_token_and_activates_feeds() {
    let h = harness();
    h.catalog.stub_recommended(vec![product("r-1", 15000)]);
    h.user.seed_history("earlier search");

    let session = h.app.login(&creds()).await.unwrap();

    assert_eq!(session.principal_id, "7");
    assert_eq!(h.tokens.stored().unwrap().as_str(), VALID_TOKEN);
    // Activation fetched each session-gated feed once
    assert_eq!(h.catalog.recommended_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.app.recommendations().products().len(), 1);
    assert_eq!(h.app.history().entries().len(), 1);
}

#[tokio::test]
async fn rejected_login_establishes_no_session() {
    let h = harness();
    h.user.reject_auth();

    let result = h.app.login(&creds()).await;

    assert!(matches!(result, Err(DealfinderError::InvalidCredentials)));
    assert!(!h.app.session().is_authenticated());
    assert!(h.tokens.stored().is_none());
}

#[tokio::test]
async fn rejected_registration_establishes_no_session() {
    let h = harness();
    h.user.reject_auth();

    let result = h.app.register(&registration()).await;

    assert!(matches!(result, Err(DealfinderError::RegistrationFailed(_))));
    assert!(!h.app.session().is_authenticated());
}

#[tokio::test]
async fn registration_behaves_like_login() {
    let h = harness();

    let session = h.app.register(&registration()).await.unwrap();

    assert_eq!(session.display_name, "wanjiru");
    assert!(h.app.session().is_authenticated());
    assert!(h.tokens.stored().is_some());
}

#[tokio::test]
async fn logout_clears_token_and_session_without_network() {
    let h = authenticated_harness().await;
    let calls_before = h.user.network_calls.load(Ordering::SeqCst);

    h.app.logout().await;

    assert!(!h.app.session().is_authenticated());
    assert!(h.app.session().token().is_none());
    assert!(h.tokens.stored().is_none());
    assert_eq!(h.user.network_calls.load(Ordering::SeqCst), calls_before);
}

#[tokio::test]
async fn recommendations_refresh_is_noop_when_unauthenticated() {
    let h = harness();

    h.app.recommendations().refresh().await.unwrap();

    assert_eq!(h.catalog.recommended_calls.load(Ordering::SeqCst), 0);
    assert!(h.app.recommendations().products().is_empty());
}
