//! Server setup and initialization
//!
//! Builds the admin application, wires the database, and owns the
//! retention sweeper task.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use rpclog_common::{AppConfig, AppError};
use rpclog_db::{create_pool, run_migrations, PgRequestLogRepository};
use rpclog_service::RetentionSweeper;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router().merge(health_routes());
    let router = apply_middleware(router);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = rpclog_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let repository = Arc::new(PgRequestLogRepository::new(pool.clone()));

    Ok(AppState::new(pool, repository, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.admin.port));
    let retention = config.retention.clone();

    let state = create_app_state(config).await?;

    // The sweeper shares the repository and runs for the life of the
    // process; a bad schedule expression aborts startup here.
    let sweeper = RetentionSweeper::new(state.repository(), &retention)
        .map_err(|e| AppError::Config(e.to_string()))?;
    tokio::spawn(sweeper.run());

    let app = create_app(state);
    run_server(app, addr).await
}
