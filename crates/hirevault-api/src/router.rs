//! Route definitions for the HireVault HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the routing tree and thread `state` through every route.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(candidate_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Auth endpoints: login, refresh, logout, current user
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/user", get(handlers::auth::current_user))
}

/// Candidate collections and their verification ledger
fn candidate_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/candidates/{candidate_id}/{collection}",
            get(handlers::candidates::list),
        )
        .route(
            "/candidates/{candidate_id}/{collection}/{sub_id}/verify",
            put(handlers::candidates::verify),
        )
        .route(
            "/candidates/{candidate_id}/{collection}/{sub_id}/unverify",
            put(handlers::candidates::unverify).delete(handlers::candidates::unverify),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
