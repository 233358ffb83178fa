//! HTTP server initialization and runtime setup.
//!
//! Handles storage setup, background task spawning, and the Axum server
//! lifecycle including graceful shutdown.

use crate::application::services::{LinkService, LinkSettings};
use crate::config::{Config, StorageBackend};
use crate::domain::click_worker::run_click_worker;
use crate::domain::rate_limiter::RateLimiter;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::{InMemoryLinkRepository, PgLinkRepository};
use crate::infrastructure::rate_limit::{SlidingWindowLimiter, run_sweeper};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// How long shutdown waits for queued click events to be written.
const CLICK_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link storage (PostgreSQL with migrations, or in-memory)
/// - Sliding-window rate limiter and its sweeper task
/// - Background click worker
/// - Axum HTTP server
///
/// Returns after Ctrl-C or SIGTERM once in-flight requests have finished.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let link_repository = build_repository(&config).await?;

    let rate_limiter: Arc<dyn RateLimiter> = Arc::new(SlidingWindowLimiter::new(
        config.rate_limit_max_requests,
        config.rate_limit_window(),
    ));
    tokio::spawn(run_sweeper(
        rate_limiter.clone(),
        Duration::from_secs(config.rate_limit_sweep_secs),
    ));

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    let click_worker = tokio::spawn(run_click_worker(click_rx, link_repository.clone()));
    tracing::info!("Click worker started");

    let link_service = Arc::new(LinkService::new(
        link_repository,
        rate_limiter.clone(),
        click_tx.clone(),
        LinkSettings {
            base_url: config.base_url.clone(),
            code_length: config.short_code_length,
            max_attempts: config.code_generation_attempts,
        },
    ));

    let state = AppState::new(link_service, rate_limiter, click_tx, config.redirect_mode);
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned every sender; the worker now drains and exits.
    match tokio::time::timeout(CLICK_DRAIN_TIMEOUT, click_worker).await {
        Ok(_) => tracing::info!("Click worker drained"),
        Err(_) => tracing::warn!("Click worker did not drain in time, pending clicks dropped"),
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn build_repository(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres storage backend")?;

            let pool = connect_pool(config, database_url).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;

            Ok(Arc::new(PgLinkRepository::new(Arc::new(pool))))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; links are lost on restart");
            Ok(Arc::new(InMemoryLinkRepository::new()))
        }
    }
}

async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
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
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
