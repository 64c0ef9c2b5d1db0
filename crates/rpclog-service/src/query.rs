//! Read-side query service for the admin surface
//!
//! Strictly read-only: listing, detail, and CSV export. Nothing in this
//! module can create, update, or delete a record.

use std::sync::Arc;

use rpclog_core::entities::RequestLog;
use rpclog_core::error::DomainError;
use rpclog_core::traits::{LogQuery, RepoResult, RequestLogRepository};
use rpclog_core::value_objects::LogId;

use crate::dto::{PaginatedLogs, PaginationMeta, RequestLogDetail, RequestLogSummary};

const EXPORT_HEADER: &str =
    "id,api_name,status,description,created_from_ip,created_by,stopwatch_duration,create_time";

/// Queries over persisted audit records
pub struct LogQueryService {
    repo: Arc<dyn RequestLogRepository>,
}

impl LogQueryService {
    pub fn new(repo: Arc<dyn RequestLogRepository>) -> Self {
        Self { repo }
    }

    /// List records matching the query, newest first, with a cursor for
    /// the next page
    pub async fn list(&self, mut query: LogQuery) -> RepoResult<PaginatedLogs> {
        let limit = query.limit;
        // Fetch one extra row to learn whether another page exists
        query.limit = limit + 1;

        let mut logs = self.repo.search(&query).await?;
        let has_more = logs.len() as i64 > limit;
        logs.truncate(limit as usize);

        let before = if has_more {
            logs.last().map(|l| l.id.to_string())
        } else {
            None
        };

        Ok(PaginatedLogs {
            data: logs.iter().map(RequestLogSummary::from).collect(),
            pagination: PaginationMeta {
                before,
                has_more,
                limit,
            },
        })
    }

    /// Fetch one record by id
    pub async fn detail(&self, id: LogId) -> RepoResult<RequestLogDetail> {
        let log = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::LogNotFound(id))?;
        Ok(RequestLogDetail::from(log))
    }

    /// Export records matching the query as CSV
    pub async fn export_csv(&self, query: LogQuery) -> RepoResult<String> {
        let logs = self.repo.search(&query).await?;

        let mut out = String::from(EXPORT_HEADER);
        out.push('\n');
        for log in &logs {
            out.push_str(&export_row(log));
            out.push('\n');
        }
        Ok(out)
    }
}

fn export_row(log: &RequestLog) -> String {
    let fields = [
        log.id.to_string(),
        log.api_name.clone(),
        log.status_label().to_string(),
        log.description.clone().unwrap_or_default(),
        log.created_from_ip.clone().unwrap_or_default(),
        log.created_by.clone().unwrap_or_default(),
        log.stopwatch_duration
            .map(|d| format!("{d:.2}"))
            .unwrap_or_default(),
        log.create_time
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
    ];
    fields
        .iter()
        .map(|f| csv_escape(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a CSV field when it contains a delimiter, quote, or newline
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
