//! Asynchronous persistence sink
//!
//! `LogSink::enqueue` hands a record to a bounded channel and returns
//! immediately; a dedicated writer task drains the channel and performs
//! the inserts. The calling request path never blocks on database I/O,
//! and no failure on the write side ever reaches it: a full queue drops
//! the record with a warning, a dead writer drops it with an error, and
//! insert failures stay inside the writer task. Records may be persisted
//! out of order; each record's create_time is stamped by the database at
//! insert, so it reflects persistence time either way.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use rpclog_core::entities::RequestLog;
use rpclog_core::traits::RequestLogRepository;

/// Cheap cloneable handle for enqueueing records
#[derive(Clone)]
pub struct LogSink {
    tx: mpsc::Sender<RequestLog>,
}

impl LogSink {
    /// Create a sink and the receiving end of its bounded queue
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<RequestLog>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Fire-and-forget handoff to the background writer
    ///
    /// Never blocks and never returns an error to the caller. When the
    /// queue is full the record is dropped: logging is best-effort and
    /// non-blocking by contract, so shedding load beats stalling the
    /// response path.
    pub fn enqueue(&self, record: RequestLog) {
        match self.tx.try_send(record) {
            Ok(()) => {}
            Err(TrySendError::Full(record)) => {
                warn!(
                    id = %record.id,
                    api_name = %record.api_name,
                    "audit log queue full, dropping record"
                );
            }
            Err(TrySendError::Closed(record)) => {
                error!(
                    id = %record.id,
                    api_name = %record.api_name,
                    "audit log writer is gone, dropping record"
                );
            }
        }
    }
}

/// Background task that drains the queue into the repository
pub struct LogWriter {
    rx: mpsc::Receiver<RequestLog>,
    repo: Arc<dyn RequestLogRepository>,
}

impl LogWriter {
    pub fn new(rx: mpsc::Receiver<RequestLog>, repo: Arc<dyn RequestLogRepository>) -> Self {
        Self { rx, repo }
    }

    /// Run until every sink handle is dropped and the queue is drained
    pub async fn run(mut self) {
        while let Some(record) = self.rx.recv().await {
            if let Err(err) = self.repo.insert(&record).await {
                error!(
                    error = %err,
                    id = %record.id,
                    api_name = %record.api_name,
                    "failed to persist audit record"
                );
            }
        }
        debug!("audit log queue closed, writer exiting");
    }
}

/// Wire up a sink with a spawned writer task
pub fn spawn_writer(
    repo: Arc<dyn RequestLogRepository>,
    capacity: usize,
) -> (LogSink, JoinHandle<()>) {
    let (sink, rx) = LogSink::bounded(capacity);
    let handle = tokio::spawn(LogWriter::new(rx, repo).run());
    (sink, handle)
}
