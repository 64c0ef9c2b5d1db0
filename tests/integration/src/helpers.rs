//! Test helpers for integration tests
//!
//! Provides an in-memory repository implementation and a fully wired
//! capture pipeline (engine, bounded queue, writer task).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use rpclog_common::CaptureConfig;
use rpclog_core::entities::RequestLog;
use rpclog_core::registry::MethodRegistry;
use rpclog_core::traits::{LogQuery, RepoResult, RequestLogRepository};
use rpclog_core::value_objects::{LogId, LogIdGenerator};
use rpclog_service::{spawn_writer, LogCapture};

/// In-memory RequestLogRepository
///
/// Mirrors the PostgreSQL implementation's semantics: `insert` stamps
/// `create_time` with the current instant (persistence time, not
/// assembly time), search returns newest first, deletes go by age.
#[derive(Default)]
pub struct InMemoryRequestLogRepository {
    logs: Mutex<Vec<RequestLog>>,
}

impl InMemoryRequestLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record with a fixed create_time, for retention tests
    pub fn seed_with_create_time(&self, mut log: RequestLog, create_time: DateTime<Utc>) {
        log.create_time = Some(create_time);
        self.logs.lock().unwrap().push(log);
    }

    /// Snapshot of everything stored
    pub fn all(&self) -> Vec<RequestLog> {
        self.logs.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.logs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RequestLogRepository for InMemoryRequestLogRepository {
    async fn insert(&self, log: &RequestLog) -> RepoResult<()> {
        let mut stored = log.clone();
        stored.create_time = Some(Utc::now());
        self.logs.lock().unwrap().push(stored);
        Ok(())
    }

    async fn find_by_id(&self, id: LogId) -> RepoResult<Option<RequestLog>> {
        Ok(self
            .logs
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    async fn search(&self, query: &LogQuery) -> RepoResult<Vec<RequestLog>> {
        let matches_keyword = |log: &RequestLog, keyword: &str| {
            [&log.description, &log.request, &log.response]
                .into_iter()
                .flatten()
                .any(|field| field.contains(keyword))
        };

        let mut logs: Vec<_> = self
            .logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| query.api_name.as_ref().map_or(true, |n| &l.api_name == n))
            .filter(|l| {
                query
                    .created_from_ip
                    .as_ref()
                    .map_or(true, |ip| l.created_from_ip.as_ref() == Some(ip))
            })
            .filter(|l| query.keyword.as_ref().map_or(true, |k| matches_keyword(l, k)))
            .filter(|l| {
                query
                    .from
                    .map_or(true, |from| l.create_time.map_or(false, |t| t >= from))
            })
            .filter(|l| {
                query
                    .to
                    .map_or(true, |to| l.create_time.map_or(false, |t| t < to))
            })
            .filter(|l| query.before.map_or(true, |b| l.id < b))
            .cloned()
            .collect();

        logs.sort_by(|a, b| b.id.cmp(&a.id));
        logs.truncate(query.limit as usize);
        Ok(logs)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> RepoResult<u64> {
        let mut logs = self.logs.lock().unwrap();
        let before = logs.len();
        logs.retain(|l| l.create_time.map_or(true, |t| t >= cutoff));
        Ok((before - logs.len()) as u64)
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.len() as i64)
    }
}

/// Fully wired capture pipeline over the in-memory repository
pub struct Pipeline {
    pub capture: LogCapture,
    pub repo: Arc<InMemoryRequestLogRepository>,
    writer: JoinHandle<()>,
}

impl Pipeline {
    /// Start a pipeline with the given method registry
    pub fn start(registry: MethodRegistry) -> Self {
        let repo = Arc::new(InMemoryRequestLogRepository::new());
        let (sink, writer) = spawn_writer(repo.clone(), 64);
        let capture = LogCapture::new(
            Arc::new(registry),
            Arc::new(LogIdGenerator::new(1)),
            sink,
            &CaptureConfig::default(),
        );
        Self {
            capture,
            repo,
            writer,
        }
    }

    /// Close the queue, wait for the writer to drain, and hand back the
    /// repository for assertions
    pub async fn shutdown(self) -> Arc<InMemoryRequestLogRepository> {
        drop(self.capture);
        self.writer.await.expect("writer task panicked");
        self.repo
    }
}
