//! Application builder and HTTP server lifecycle.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::middleware::from_fn;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinError;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use hirevault_core::config::AppConfig;
use hirevault_core::error::{AppError, ErrorKind};
use hirevault_core::traits::SystemClock;
use hirevault_database::Repositories;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(from_fn(request_logging))
}

/// Binds the configured address and serves until `shutdown` resolves.
pub async fn serve<F>(state: AppState, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = state.config.server.bind_address();
    let listener = TcpListener::bind(&address).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {address}"), e)
    })?;

    tracing::info!(address = %address, "HireVault API listening");

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Runs the HireVault API with the given configuration and repositories
/// until Ctrl+C or SIGTERM.
///
/// In-flight requests get `server.shutdown_grace_seconds` to finish once
/// the signal arrives; the server task is aborted after that.
pub async fn run_server(config: AppConfig, repositories: Repositories) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = ?config.database.provider,
        "Starting HireVault API"
    );

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let pool = repositories.pool.clone();
    let state = AppState::new(config, repositories, Arc::new(SystemClock))?;

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut server = tokio::spawn(serve(state, async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    }));

    let result = tokio::select! {
        joined = &mut server => joined,
        _ = shutdown_rx.changed() => match tokio::time::timeout(grace, &mut server).await {
            Ok(joined) => joined,
            Err(_) => {
                tracing::warn!(
                    grace_seconds = grace.as_secs(),
                    "Grace period elapsed, aborting open connections"
                );
                server.abort();
                Ok(Ok(()))
            }
        },
    };

    if let Some(pool) = pool {
        pool.close().await;
    }

    result.map_err(join_error)?
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

fn join_error(err: JoinError) -> AppError {
    AppError::with_source(ErrorKind::Internal, "Server task failed", err)
}
