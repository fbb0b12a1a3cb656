//! Shared helpers for router-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use hirevault_api::{AppState, build_app};
use hirevault_auth::PasswordHasher;
use hirevault_core::config::AppConfig;
use hirevault_core::traits::{Clock, FixedClock};
use hirevault_database::{InMemoryDatabase, Repositories};
use hirevault_entity::candidate::Candidate;
use hirevault_entity::recruiter::Recruiter;
use hirevault_entity::user::{AccountType, User};
use hirevault_entity::verification::CollectionKind;

pub const PASSWORD: &str = "correct-horse";
pub const CANDIDATE_ID: i64 = 21;
pub const OTHER_CANDIDATE_ID: i64 = 22;

/// Router over a seeded in-memory database and a fixed clock.
pub struct TestApp {
    pub router: Router,
    pub db: InMemoryDatabase,
    pub clock: FixedClock,
    pub work_id: Uuid,
}

/// Status, headers and JSON body of one response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `Set-Cookie` header, if any.
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
    }
}

pub fn test_config() -> AppConfig {
    serde_json::from_value(json!({
        "database": { "provider": "memory" },
        "auth": {
            "access_token_secret": "test-access-secret",
            "refresh_token_secret": "test-refresh-secret",
            "algorithm": "HS256",
            "access_token_ttl_minutes": 30,
            "refresh_token_ttl_seconds": 7200,
            "refresh_cookie_name": "refresh_token",
            "cookie_secure": false
        }
    }))
    .expect("test config")
}

impl TestApp {
    pub async fn new() -> Self {
        let db = InMemoryDatabase::new();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 9, 2, 9, 0, 0).unwrap());
        let hash = PasswordHasher::new().hash_password(PASSWORD).unwrap();

        seed_recruiter(&db, &hash, 1, 11, "rita", "Rita", "Recruiter").await;
        seed_recruiter(&db, &hash, 4, 14, "rob", "Rob", "Reviewer").await;
        seed_candidate(&db, &hash, 2, CANDIDATE_ID, "carl").await;
        seed_candidate(&db, &hash, 5, OTHER_CANDIDATE_ID, "cara").await;

        let work_id = Uuid::new_v4();
        db.set_collection(
            CANDIDATE_ID,
            CollectionKind::WorkExperience,
            json!([{ "id": work_id, "company": "Acme", "title": "Engineer" }]),
        )
        .await
        .unwrap();

        let shared_clock: Arc<dyn Clock> = Arc::new(clock.clone());
        let state = AppState::new(
            test_config(),
            Repositories::in_memory(db.clone()),
            shared_clock,
        )
        .expect("state");

        Self {
            router: build_app(state),
            db,
            clock,
            work_id,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_with_cookie(&self, uri: &str, cookie: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_json_with_cookie(&self, uri: &str, cookie: &str, body: Value) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::COOKIE, cookie)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn authed(&self, method: Method, uri: &str, token: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn login(&self, login: &str, password: &str) -> TestResponse {
        self.post_json(
            "/api/auth/login",
            json!({ "username": login, "password": password }),
        )
        .await
    }

    /// Logs in and returns `(access_token, refresh_token)`.
    pub async fn tokens_for(&self, login: &str) -> (String, String) {
        let response = self.login(login, PASSWORD).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        let data = &response.body["data"];
        (
            data["access_token"].as_str().unwrap().to_string(),
            data["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    pub async fn access_token(&self, login: &str) -> String {
        self.tokens_for(login).await.0
    }
}

async fn seed_recruiter(
    db: &InMemoryDatabase,
    hash: &str,
    user_id: i64,
    recruiter_id: i64,
    username: &str,
    first: &str,
    last: &str,
) {
    db.insert_user(User {
        id: user_id,
        username: username.to_string(),
        email: format!("{username}@agency.test"),
        password_hash: hash.to_string(),
        account_type: AccountType::Recruiter,
        created_at: Utc::now(),
    })
    .await;
    db.insert_recruiter(Recruiter {
        id: recruiter_id,
        user_id,
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
    })
    .await;
}

async fn seed_candidate(
    db: &InMemoryDatabase,
    hash: &str,
    user_id: i64,
    candidate_id: i64,
    username: &str,
) {
    db.insert_user(User {
        id: user_id,
        username: username.to_string(),
        email: format!("{username}@mail.test"),
        password_hash: hash.to_string(),
        account_type: AccountType::Candidate,
        created_at: Utc::now(),
    })
    .await;
    db.insert_candidate(Candidate {
        id: candidate_id,
        user_id: Some(user_id),
        first_name: Some(username.to_string()),
        last_name: Some("Candidate".to_string()),
        email: Some(format!("{username}@mail.test")),
        phone_number: None,
        job_title: None,
        years_of_experience: None,
        status: None,
        created_at: Utc::now(),
    })
    .await;
}
