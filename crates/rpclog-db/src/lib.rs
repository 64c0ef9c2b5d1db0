//! # rpclog-db
//!
//! Database layer implementing the `RequestLogRepository` trait with
//! PostgreSQL via SQLx:
//!
//! - Connection pool management and migrations
//! - Database model with SQLx `FromRow` derive
//! - Entity ↔ model mappers
//! - Repository implementation

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::PgRequestLogRepository;
