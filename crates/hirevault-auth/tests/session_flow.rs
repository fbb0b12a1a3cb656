//! Login, refresh, logout and identity resolution over the in-memory store.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use jsonwebtoken::Algorithm;

use hirevault_auth::token::TokenPolicy;
use hirevault_auth::{
    Actor, IdentityResolver, PasswordHasher, SessionManager, SessionStore, TokenCodec,
    TokenService, TokenType,
};
use hirevault_core::error::ErrorKind;
use hirevault_core::traits::{Clock, FixedClock};
use hirevault_database::InMemoryDatabase;
use hirevault_entity::candidate::Candidate;
use hirevault_entity::recruiter::Recruiter;
use hirevault_entity::user::{AccountType, User};

const PASSWORD: &str = "s3cret-pass";

struct Fixture {
    db: InMemoryDatabase,
    clock: FixedClock,
    manager: SessionManager,
    identity: Arc<IdentityResolver>,
    tokens: Arc<TokenService>,
}

async fn fixture() -> Fixture {
    let db = InMemoryDatabase::new();
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).unwrap());
    let shared_clock: Arc<dyn Clock> = Arc::new(clock.clone());
    let hash = PasswordHasher::new().hash_password(PASSWORD).unwrap();

    db.insert_user(User {
        id: 1,
        username: "rita".into(),
        email: "rita@agency.test".into(),
        password_hash: hash.clone(),
        account_type: AccountType::Recruiter,
        created_at: clock.now(),
    })
    .await;
    db.insert_recruiter(Recruiter {
        id: 11,
        user_id: 1,
        first_name: Some("Rita".into()),
        last_name: Some("Recruiter".into()),
    })
    .await;

    db.insert_user(User {
        id: 2,
        username: "carl".into(),
        email: "carl@mail.test".into(),
        password_hash: hash.clone(),
        account_type: AccountType::Candidate,
        created_at: clock.now(),
    })
    .await;
    db.insert_candidate(Candidate {
        id: 21,
        user_id: Some(2),
        first_name: Some("Carl".into()),
        last_name: Some("Candidate".into()),
        email: Some("carl@mail.test".into()),
        phone_number: None,
        job_title: Some("Engineer".into()),
        years_of_experience: Some(4),
        status: Some("applied".into()),
        created_at: clock.now(),
    })
    .await;

    // A recruiter account whose profile was never created.
    db.insert_user(User {
        id: 3,
        username: "orphan".into(),
        email: "orphan@agency.test".into(),
        password_hash: hash,
        account_type: AccountType::Recruiter,
        created_at: clock.now(),
    })
    .await;

    let tokens = Arc::new(TokenService::new(
        TokenCodec::new(b"access", Algorithm::HS256).unwrap(),
        TokenCodec::new(b"refresh", Algorithm::HS256).unwrap(),
        TokenPolicy {
            access_ttl: Duration::minutes(15),
            refresh_ttl: Duration::seconds(7200),
        },
        shared_clock.clone(),
    ));
    let identity = Arc::new(IdentityResolver::new(Arc::new(db.clone())));
    let sessions = Arc::new(SessionStore::new(Arc::new(db.clone()), shared_clock));
    let manager = SessionManager::new(
        tokens.clone(),
        sessions,
        Arc::new(db.clone()),
        identity.clone(),
        Arc::new(PasswordHasher::new()),
    );

    Fixture {
        db,
        clock,
        manager,
        identity,
        tokens,
    }
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_look_the_same() {
    let f = fixture().await;

    let wrong = f
        .manager
        .login("rita@agency.test", "nope", "ua", "127.0.0.1")
        .await
        .unwrap_err();
    let unknown = f
        .manager
        .login("nobody@agency.test", PASSWORD, "ua", "127.0.0.1")
        .await
        .unwrap_err();

    assert_eq!(wrong.kind, ErrorKind::InvalidCredentials);
    assert_eq!(unknown.kind, ErrorKind::InvalidCredentials);
    assert_eq!(wrong.message, unknown.message);
}

#[tokio::test]
async fn test_malformed_stored_hash_is_invalid_credentials() {
    let f = fixture().await;
    f.db.insert_user(User {
        id: 4,
        username: "legacy".into(),
        email: "legacy@agency.test".into(),
        password_hash: "not-a-phc-string".into(),
        account_type: AccountType::Recruiter,
        created_at: f.clock.now(),
    })
    .await;

    let err = f
        .manager
        .login("legacy", PASSWORD, "ua", "127.0.0.1")
        .await
        .unwrap_err();
    let unknown = f
        .manager
        .login("nobody", PASSWORD, "ua", "127.0.0.1")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidCredentials);
    assert_eq!(err.message, unknown.message);
}

#[tokio::test]
async fn test_login_creates_session_matching_refresh_token() {
    let f = fixture().await;
    let result = f
        .manager
        .login("rita@agency.test", PASSWORD, "Mozilla/5.0", "10.1.2.3")
        .await
        .unwrap();

    assert_ne!(result.access_token, result.refresh_token);
    assert_eq!(result.access_payload.token_type, TokenType::Access);
    assert_eq!(result.refresh_payload.token_type, TokenType::Refresh);
    assert_eq!(result.access_payload.role_id, Some(11));

    let session = &result.session;
    assert!(!session.is_blocked);
    assert_eq!(session.user_id, 1);
    assert_eq!(session.user_agent, "Mozilla/5.0");
    assert_eq!(session.client_ip, "10.1.2.3");
    assert_eq!(session.refresh_token, result.refresh_token);
    assert_eq!(
        session.expires_at,
        result.refresh_payload.issued_at + Duration::seconds(7200)
    );
}

#[tokio::test]
async fn test_login_by_username() {
    let f = fixture().await;
    let result = f.manager.login("CARL", PASSWORD, "ua", "ip").await.unwrap();
    assert_eq!(result.user.id, 2);
    assert_eq!(result.access_payload.account_type, AccountType::Candidate);
}

#[tokio::test]
async fn test_refresh_carries_identity_forward() {
    let f = fixture().await;
    let login = f
        .manager
        .login("rita", PASSWORD, "ua", "ip")
        .await
        .unwrap();

    f.clock.advance(Duration::minutes(20));
    let refreshed = f.manager.refresh(&login.refresh_token).await.unwrap();

    assert_eq!(refreshed.access_payload.user_id, login.refresh_payload.user_id);
    assert_eq!(refreshed.access_payload.account_type, AccountType::Recruiter);
    assert_eq!(refreshed.access_payload.role_id, login.refresh_payload.role_id);
    assert_eq!(refreshed.access_payload.issued_at, f.clock.now());
    assert!(f.tokens.validate_access(&refreshed.access_token).is_ok());

    // No rotation and no new session row.
    let sessions = f.manager.sessions().list_for_user(1).await.unwrap();
    assert_eq!(sessions.len(), 1);
}

#[tokio::test]
async fn test_blocked_session_fails_refresh_with_valid_token() {
    let f = fixture().await;
    let login = f.manager.login("rita", PASSWORD, "ua", "ip").await.unwrap();

    f.manager.sessions().block(login.session.id).await.unwrap();

    assert!(f.tokens.validate_refresh(&login.refresh_token).is_ok());
    let err = f.manager.refresh(&login.refresh_token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidOrExpiredRefreshToken);
}

#[tokio::test]
async fn test_refresh_after_expiry_fails() {
    let f = fixture().await;
    let login = f.manager.login("rita", PASSWORD, "ua", "ip").await.unwrap();

    f.clock.set(login.session.expires_at);
    assert!(f.manager.refresh(&login.refresh_token).await.is_ok());

    f.clock.advance(Duration::seconds(1));
    let err = f.manager.refresh(&login.refresh_token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidOrExpiredRefreshToken);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let f = fixture().await;
    let login = f.manager.login("rita", PASSWORD, "ua", "ip").await.unwrap();
    let err = f.manager.refresh(&login.access_token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidOrExpiredRefreshToken);
}

#[tokio::test]
async fn test_refresh_token_without_session_fails() {
    let f = fixture().await;
    let (_, orphan) = f
        .tokens
        .issue(TokenType::Refresh, 1, AccountType::Recruiter, Some(11))
        .unwrap();
    let err = f.manager.refresh(&orphan).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidOrExpiredRefreshToken);
}

#[tokio::test]
async fn test_logout_is_idempotent_and_blocks_refresh() {
    let f = fixture().await;
    let login = f.manager.login("rita", PASSWORD, "ua", "ip").await.unwrap();

    let blocked = f.manager.logout(&login.refresh_token).await.unwrap();
    assert!(blocked.is_blocked);
    assert!(f.manager.logout(&login.refresh_token).await.is_ok());

    let err = f.manager.refresh(&login.refresh_token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidOrExpiredRefreshToken);

    // The stateless access token survives logout until it expires.
    assert!(f.tokens.validate_access(&login.access_token).is_ok());

    let err = f.manager.logout("unknown").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidOrExpiredRefreshToken);
}

#[tokio::test]
async fn test_session_lookup_by_id_reflects_block() {
    let f = fixture().await;
    let login = f.manager.login("carl", PASSWORD, "ua", "10.0.0.9").await.unwrap();
    let store = f.manager.sessions();

    let found = store.find_by_id(login.session.id).await.unwrap().unwrap();
    assert_eq!(found.client_ip, "10.0.0.9");
    assert!(!found.is_blocked);

    store.block(login.session.id).await.unwrap();
    let found = store.find_by_id(login.session.id).await.unwrap().unwrap();
    assert!(found.is_blocked);

    assert!(store.find_by_id(uuid::Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_identity_resolves_each_role() {
    let f = fixture().await;

    let recruiter = f.manager.login("rita", PASSWORD, "ua", "ip").await.unwrap();
    let actor = f.identity.resolve(&recruiter.access_payload).await.unwrap();
    assert!(matches!(actor, Actor::Recruiter { ref recruiter, .. } if recruiter.id == 11));

    let candidate = f.manager.login("carl", PASSWORD, "ua", "ip").await.unwrap();
    let actor = f.identity.resolve(&candidate.access_payload).await.unwrap();
    assert_eq!(actor.account_type(), AccountType::Candidate);
    assert_eq!(actor.profile_id(), 21);
}

#[tokio::test]
async fn test_identity_rejects_role_mismatch_and_missing_profile() {
    let f = fixture().await;

    let (forged, _) = f
        .tokens
        .issue(TokenType::Access, 2, AccountType::Recruiter, None)
        .unwrap();
    let err = f.identity.resolve(&forged).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidCredentials);

    let (orphan, _) = f
        .tokens
        .issue(TokenType::Access, 3, AccountType::Recruiter, None)
        .unwrap();
    let err = f.identity.resolve(&orphan).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidCredentials);

    let (ghost, _) = f
        .tokens
        .issue(TokenType::Access, 99, AccountType::Candidate, None)
        .unwrap();
    let err = f.identity.resolve(&ghost).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidCredentials);
}
