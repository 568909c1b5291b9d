mod common;

use std::time::Duration;

use common::{FakeExchanger, GOOD_CODE, HangingExchanger, NOW, token};
use sporldash::management::{SessionState, TokenState, get_valid_token_at};

#[tokio::test]
async fn test_no_token_and_no_code_returns_none() {
    let exchanger = FakeExchanger::new();
    let mut session = SessionState::new();

    let result = get_valid_token_at(&mut session, None, &exchanger, NOW).await;

    assert!(result.is_none());
    assert_eq!(exchanger.calls(), 0);
    assert_eq!(session.state_at(NOW), TokenState::NoToken);
}

#[tokio::test]
async fn test_valid_token_is_returned_without_exchange() {
    let exchanger = FakeExchanger::new();
    let stored = token("stored-access", NOW + 600);
    let mut session = SessionState::with_token(stored.clone());

    let result = get_valid_token_at(&mut session, None, &exchanger, NOW).await;
    assert_eq!(result, Some(stored.clone()));

    // an incoming code does not replace a token that is still valid
    let result = get_valid_token_at(&mut session, Some(GOOD_CODE), &exchanger, NOW).await;
    assert_eq!(result, Some(stored));
    assert_eq!(exchanger.calls(), 0);
    assert!(!session.has_consumed(GOOD_CODE));
}

#[tokio::test]
async fn test_expired_token_is_never_returned() {
    let exchanger = FakeExchanger::new();
    let mut session = SessionState::with_token(token("stale", NOW - 1));

    let result = get_valid_token_at(&mut session, None, &exchanger, NOW).await;

    assert!(result.is_none());
    assert_eq!(exchanger.calls(), 0);
    assert_eq!(session.state_at(NOW), TokenState::Expired);
}

#[tokio::test]
async fn test_token_expires_exactly_at_expires_at() {
    let session = SessionState::with_token(token("edge", NOW));

    assert_eq!(session.state_at(NOW - 1), TokenState::Valid);
    assert_eq!(session.state_at(NOW), TokenState::Expired);
}

#[tokio::test]
async fn test_code_is_exchanged_once_and_cached() {
    let exchanger = FakeExchanger::new();
    let mut session = SessionState::new();

    let first = get_valid_token_at(&mut session, Some(GOOD_CODE), &exchanger, NOW).await;
    let first = first.expect("exchange should produce a token");
    assert_eq!(first.access_token, "fresh-access");
    assert_eq!(exchanger.calls(), 1);
    assert_eq!(session.token(), Some(&first));
    assert_eq!(session.state_at(NOW), TokenState::Valid);
    assert!(session.has_consumed(GOOD_CODE));

    // a reload still carrying the same code reuses the stored token
    let second = get_valid_token_at(&mut session, Some(GOOD_CODE), &exchanger, NOW).await;
    assert_eq!(second, Some(first));
    assert_eq!(exchanger.calls(), 1);
}

#[tokio::test]
async fn test_consumed_code_is_not_exchanged_again_after_expiry() {
    let exchanger = FakeExchanger::expiring_at(NOW + 10);
    let mut session = SessionState::new();

    get_valid_token_at(&mut session, Some(GOOD_CODE), &exchanger, NOW).await;
    assert_eq!(exchanger.calls(), 1);

    let later = NOW + 60;
    let result = get_valid_token_at(&mut session, Some(GOOD_CODE), &exchanger, later).await;

    assert!(result.is_none());
    assert_eq!(exchanger.calls(), 1);
    assert_eq!(session.state_at(later), TokenState::Expired);
}

#[tokio::test]
async fn test_failed_exchange_yields_none_and_no_token() {
    let exchanger = FakeExchanger::new();
    let mut session = SessionState::new();

    let result = get_valid_token_at(&mut session, Some("bogus"), &exchanger, NOW).await;

    assert!(result.is_none());
    assert_eq!(exchanger.calls(), 1);
    assert_eq!(session.state_at(NOW), TokenState::NoToken);
    assert!(session.token().is_none());

    // the rejected code is burnt as well
    get_valid_token_at(&mut session, Some("bogus"), &exchanger, NOW).await;
    assert_eq!(exchanger.calls(), 1);
}

#[tokio::test]
async fn test_failed_exchange_drops_expired_token() {
    let exchanger = FakeExchanger::new();
    let mut session = SessionState::with_token(token("stale", NOW - 100));
    assert_eq!(session.state_at(NOW), TokenState::Expired);

    let result = get_valid_token_at(&mut session, Some("bogus"), &exchanger, NOW).await;

    assert!(result.is_none());
    assert_eq!(session.state_at(NOW), TokenState::NoToken);
}

#[tokio::test]
async fn test_relogin_after_expiry_replaces_token() {
    let exchanger = FakeExchanger::new();
    let mut session = SessionState::with_token(token("stale", NOW - 100));

    let result = get_valid_token_at(&mut session, Some(GOOD_CODE), &exchanger, NOW).await;

    assert_eq!(result.map(|t| t.access_token), Some("fresh-access".to_string()));
    assert_eq!(exchanger.codes(), vec![GOOD_CODE.to_string()]);
    assert_eq!(session.state_at(NOW), TokenState::Valid);
}

#[tokio::test]
async fn test_empty_code_is_ignored() {
    let exchanger = FakeExchanger::new();
    let mut session = SessionState::new();

    let result = get_valid_token_at(&mut session, Some(""), &exchanger, NOW).await;

    assert!(result.is_none());
    assert_eq!(exchanger.calls(), 0);
}

#[test]
fn test_login_state_must_match_and_is_single_use() {
    let mut session = SessionState::new();
    let issued = session.begin_login();

    assert!(session.verify_login_state(Some(&issued)).is_ok());
    assert!(session.verify_login_state(Some(&issued)).is_err());
}

#[test]
fn test_login_state_mismatch_is_rejected() {
    let mut session = SessionState::new();

    assert!(session.verify_login_state(Some("anything")).is_err());

    session.begin_login();
    assert!(session.verify_login_state(Some("forged")).is_err());

    session.begin_login();
    assert!(session.verify_login_state(None).is_err());
}

#[test]
fn test_newer_login_invalidates_older_state() {
    let mut session = SessionState::new();
    let older = session.begin_login();
    let newer = session.begin_login();

    assert_ne!(older, newer);
    assert!(session.verify_login_state(Some(&older)).is_err());
}

#[test]
fn test_clear_forgets_token() {
    let mut session = SessionState::with_token(token("stored", NOW + 600));
    session.clear();

    assert!(session.token().is_none());
    assert_eq!(session.state_at(NOW), TokenState::NoToken);
}

#[tokio::test]
async fn test_cancelled_exchange_does_not_leave_session_pending() {
    let mut session = SessionState::new();

    let exchange = get_valid_token_at(&mut session, Some("slow-code"), &HangingExchanger, NOW);
    let timed_out = tokio::time::timeout(Duration::from_millis(50), exchange).await;
    assert!(timed_out.is_err());

    assert_eq!(session.state_at(NOW), TokenState::NoToken);
    assert_eq!(session.state_at(NOW + 86_400), TokenState::NoToken);
    assert!(session.has_consumed("slow-code"));
}

#[tokio::test]
async fn test_cancelled_exchange_keeps_expired_state_visible() {
    let mut session = SessionState::with_token(token("stale", NOW - 1));

    let exchange = get_valid_token_at(&mut session, Some("slow-code"), &HangingExchanger, NOW);
    let _ = tokio::time::timeout(Duration::from_millis(50), exchange).await;

    assert_eq!(session.state_at(NOW), TokenState::Expired);
}
