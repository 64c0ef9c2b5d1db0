//! Repository traits (ports) - define the interface for log persistence
//!
//! The domain layer defines what it needs; the infrastructure layer
//! provides the implementation. The log table is append-mostly: concurrent
//! inserts plus periodic bulk deletes from the sweeper, no updates ever.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::RequestLog;
use crate::error::DomainError;
use crate::value_objects::LogId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Search/filter parameters for the administrative read surface
#[derive(Debug, Clone)]
pub struct LogQuery {
    /// Exact method identifier match
    pub api_name: Option<String>,
    /// Exact caller IP match
    pub created_from_ip: Option<String>,
    /// Substring match over description, request, and response
    pub keyword: Option<String>,
    /// Lower bound on create_time (inclusive)
    pub from: Option<DateTime<Utc>>,
    /// Upper bound on create_time (exclusive)
    pub to: Option<DateTime<Utc>>,
    /// Return records with id strictly below this cursor
    pub before: Option<LogId>,
    pub limit: i64,
}

impl LogQuery {
    pub const DEFAULT_LIMIT: i64 = 50;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_name(mut self, api_name: impl Into<String>) -> Self {
        self.api_name = Some(api_name.into());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for LogQuery {
    fn default() -> Self {
        Self {
            api_name: None,
            created_from_ip: None,
            keyword: None,
            from: None,
            to: None,
            before: None,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// Persistence port for audit records
#[async_trait]
pub trait RequestLogRepository: Send + Sync {
    /// Insert a record; the backend assigns create_time at insert
    async fn insert(&self, log: &RequestLog) -> RepoResult<()>;

    /// Fetch one record by id
    async fn find_by_id(&self, id: LogId) -> RepoResult<Option<RequestLog>>;

    /// List records matching the query, newest first
    async fn search(&self, query: &LogQuery) -> RepoResult<Vec<RequestLog>>;

    /// Bulk delete records with create_time older than the cutoff,
    /// returning the number of rows removed
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> RepoResult<u64>;

    /// Total number of stored records
    async fn count(&self) -> RepoResult<i64>;
}
