use chrono::{Duration, Utc};
use lockbox_engine::{AccessToken, SESSION_TTL_SECS, SessionState, TOKEN_REFRESH_WINDOW_SECS};
use lockbox_types::OrganizationId;

mod common;

#[test]
fn access_token_parses_version_org_and_secret() {
    let org = OrganizationId::new();
    let token: AccessToken = common::access_token(org).parse().unwrap();
    assert_eq!(token.organization_id, org);
    assert_eq!(token.client_secret, "machine-secret");
}

#[test]
fn access_token_secret_may_contain_dots() {
    let org = OrganizationId::new();
    let token: AccessToken = format!("0.{org}.abc.def.ghi").parse().unwrap();
    assert_eq!(token.client_secret, "abc.def.ghi");
}

#[test]
fn access_token_rejects_garbage() {
    assert!("garbage".parse::<AccessToken>().is_err());
    assert!("".parse::<AccessToken>().is_err());
    assert!("0.not-a-uuid.secret".parse::<AccessToken>().is_err());
}

#[test]
fn access_token_rejects_unknown_version() {
    let org = OrganizationId::new();
    let err = format!("7.{org}.secret").parse::<AccessToken>().unwrap_err();
    assert!(err.to_string().contains("token version"));
}

#[test]
fn access_token_rejects_empty_secret() {
    let org = OrganizationId::new();
    assert!(format!("0.{org}.").parse::<AccessToken>().is_err());
}

#[test]
fn fresh_session_does_not_need_refresh() {
    let now = Utc::now();
    let session = SessionState::issue(OrganizationId::new(), now).unwrap();
    assert!(!session.needs_refresh(now));
}

#[test]
fn session_needs_refresh_inside_the_window() {
    let now = Utc::now();
    let session = SessionState::issue(OrganizationId::new(), now).unwrap();
    let near_expiry =
        now + Duration::seconds(SESSION_TTL_SECS - TOKEN_REFRESH_WINDOW_SECS / 2);
    assert!(session.needs_refresh(near_expiry));
}

#[test]
fn session_needs_refresh_past_expiry() {
    let now = Utc::now();
    let session = SessionState::issue(OrganizationId::new(), now).unwrap();
    assert!(session.needs_refresh(now + Duration::seconds(SESSION_TTL_SECS + 1)));
}

#[test]
fn refresh_rotates_token_and_extends_expiry() {
    let now = Utc::now();
    let mut session = SessionState::issue(OrganizationId::new(), now).unwrap();
    let old_token = session.access_token.clone();
    let old_expiry = session.token_expiry;

    let later = now + Duration::seconds(SESSION_TTL_SECS);
    session.refresh(later).unwrap();

    assert_ne!(session.access_token, old_token);
    assert!(session.token_expiry > old_expiry);
    assert!(!session.needs_refresh(later));
}

#[test]
fn refresh_preserves_organization_context() {
    let org = OrganizationId::new();
    let now = Utc::now();
    let mut session = SessionState::issue(org, now).unwrap();
    session.refresh(now).unwrap();
    assert_eq!(session.organization_id, org);
}
