//! Login, refresh, logout and current-user endpoints.

mod common;

use axum::http::{Method, StatusCode, header};
use chrono::Duration;
use serde_json::json;

use common::{PASSWORD, TestApp};

#[tokio::test]
async fn test_login_returns_tokens_and_sets_cookie() {
    let app = TestApp::new().await;

    let response = app.login("rita", PASSWORD).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);

    let data = &response.body["data"];
    assert_eq!(data["token_type"], "bearer");
    assert_eq!(data["user"]["id"], 1);
    assert_eq!(data["user"]["account_type"], "recruiter");
    assert_eq!(data["user"]["profile_id"], 11);
    assert!(data["user"].get("password_hash").is_none());

    let refresh = data["refresh_token"].as_str().unwrap();
    let cookie = response.set_cookie().expect("refresh cookie");
    assert!(cookie.starts_with(&format!("refresh_token={refresh}")));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/api/auth"));
}

#[tokio::test]
async fn test_login_by_email_key() {
    let app = TestApp::new().await;
    let response = app
        .post_json(
            "/api/auth/login",
            json!({ "email": "CARL@mail.test", "password": PASSWORD }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["user"]["profile_id"], 21);
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let app = TestApp::new().await;

    let wrong_password = app.login("rita", "nope").await;
    let unknown_user = app.login("nobody", PASSWORD).await;

    for response in [&wrong_password, &unknown_user] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["error"], "INVALID_CREDENTIALS");
        assert_eq!(response.headers.get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
        assert!(response.set_cookie().is_none());
    }
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[tokio::test]
async fn test_login_with_empty_password_is_bad_request() {
    let app = TestApp::new().await;
    let response = app.login("rita", "").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_refresh_from_cookie_and_from_body() {
    let app = TestApp::new().await;
    let (_, refresh) = app.tokens_for("rita").await;

    let via_cookie = app
        .post_with_cookie("/api/auth/refresh", &format!("refresh_token={refresh}"))
        .await;
    assert_eq!(via_cookie.status, StatusCode::OK);
    let access = via_cookie.body["data"]["access_token"].as_str().unwrap();

    let via_body = app
        .post_json("/api/auth/refresh", json!({ "refresh_token": refresh }))
        .await;
    assert_eq!(via_body.status, StatusCode::OK);
    assert!(via_body.body["data"].get("refresh_token").is_none());

    let me = app.authed(Method::GET, "/api/auth/user", access).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["username"], "rita");
}

#[tokio::test]
async fn test_refresh_without_token_is_unauthorized() {
    let app = TestApp::new().await;
    let response = app.post_json("/api/auth/refresh", json!({})).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "INVALID_REFRESH_TOKEN");
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::new().await;
    let (access, _) = app.tokens_for("rita").await;
    let response = app
        .post_json("/api/auth/refresh", json!({ "refresh_token": access }))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "INVALID_REFRESH_TOKEN");
}

#[tokio::test]
async fn test_stale_cookie_falls_back_to_body_token() {
    let app = TestApp::new().await;
    let (_, old) = app.tokens_for("rita").await;
    app.post_json("/api/auth/logout", json!({ "refresh_token": old }))
        .await;
    let (_, fresh) = app.tokens_for("rita").await;
    let stale_cookie = format!("refresh_token={old}");

    let refreshed = app
        .post_json_with_cookie(
            "/api/auth/refresh",
            &stale_cookie,
            json!({ "refresh_token": fresh }),
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);

    // Without a usable body token the cookie's rejection stands.
    let rejected = app
        .post_json_with_cookie("/api/auth/refresh", &stale_cookie, json!({}))
        .await;
    assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);
    assert_eq!(rejected.body["error"], "INVALID_REFRESH_TOKEN");

    let logged_out = app
        .post_json_with_cookie(
            "/api/auth/logout",
            "refresh_token=not-a-session",
            json!({ "refresh_token": fresh }),
        )
        .await;
    assert_eq!(logged_out.status, StatusCode::OK);
    let after = app
        .post_json("/api/auth/refresh", json!({ "refresh_token": fresh }))
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_blocks_refresh_and_clears_cookie() {
    let app = TestApp::new().await;
    let (access, refresh) = app.tokens_for("carl").await;
    let cookie = format!("refresh_token={refresh}");

    let logout = app.post_with_cookie("/api/auth/logout", &cookie).await;
    assert_eq!(logout.status, StatusCode::OK);
    assert!(logout.set_cookie().unwrap().starts_with("refresh_token="));

    let refreshed = app.post_with_cookie("/api/auth/refresh", &cookie).await;
    assert_eq!(refreshed.status, StatusCode::UNAUTHORIZED);

    // Logging out twice is fine.
    let again = app.post_with_cookie("/api/auth/logout", &cookie).await;
    assert_eq!(again.status, StatusCode::OK);

    // The access token stays valid until it expires.
    let me = app.authed(Method::GET, "/api/auth/user", &access).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_current_user_resolves_profile() {
    let app = TestApp::new().await;
    let access = app.access_token("rita").await;

    let response = app.authed(Method::GET, "/api/auth/user", &access).await;
    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["profile_id"], 11);
    assert_eq!(data["first_name"], "Rita");
    assert_eq!(data["last_name"], "Recruiter");
}

#[tokio::test]
async fn test_current_user_requires_valid_access_token() {
    let app = TestApp::new().await;
    let (_, refresh) = app.tokens_for("rita").await;

    let missing = app
        .send(
            axum::http::Request::builder()
                .uri("/api/auth/user")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error"], "INVALID_CREDENTIALS");

    let wrong_kind = app.authed(Method::GET, "/api/auth/user", &refresh).await;
    assert_eq!(wrong_kind.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_kind.body["error"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_access_token_expiry_boundary() {
    let app = TestApp::new().await;
    let access = app.access_token("rita").await;

    app.clock.advance(Duration::minutes(30));
    let at_expiry = app.authed(Method::GET, "/api/auth/user", &access).await;
    assert_eq!(at_expiry.status, StatusCode::OK);

    app.clock.advance(Duration::seconds(1));
    let expired = app.authed(Method::GET, "/api/auth/user", &access).await;
    assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
    assert_eq!(expired.body["error"], "TOKEN_EXPIRED_OR_REVOKED");
}

#[tokio::test]
async fn test_refresh_fails_after_session_expiry() {
    let app = TestApp::new().await;
    let (_, refresh) = app.tokens_for("rita").await;

    app.clock.advance(Duration::seconds(7201));
    let response = app
        .post_json("/api/auth/refresh", json!({ "refresh_token": refresh }))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "INVALID_REFRESH_TOKEN");
}
