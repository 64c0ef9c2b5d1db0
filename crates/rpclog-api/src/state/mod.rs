//! Application state
//!
//! Holds the shared state for the Axum application: the query service,
//! the repository handle, and configuration.

use std::sync::Arc;

use rpclog_common::AppConfig;
use rpclog_core::traits::RequestLogRepository;
use rpclog_db::PgPool;
use rpclog_service::LogQueryService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pool: PgPool,
    repository: Arc<dyn RequestLogRepository>,
    query_service: Arc<LogQueryService>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        pool: PgPool,
        repository: Arc<dyn RequestLogRepository>,
        config: AppConfig,
    ) -> Self {
        let query_service = Arc::new(LogQueryService::new(repository.clone()));
        Self {
            pool,
            repository,
            query_service,
            config: Arc::new(config),
        }
    }

    /// Get the database pool (used by the readiness probe)
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the repository handle
    pub fn repository(&self) -> Arc<dyn RequestLogRepository> {
        self.repository.clone()
    }

    /// Get the query service
    pub fn query_service(&self) -> &LogQueryService {
        &self.query_service
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("query_service", &"LogQueryService")
            .field("config", &"AppConfig")
            .finish()
    }
}
