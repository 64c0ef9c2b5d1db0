//! PostgreSQL implementation of RequestLogRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;

use rpclog_core::entities::RequestLog;
use rpclog_core::traits::{LogQuery, RepoResult, RequestLogRepository};
use rpclog_core::value_objects::LogId;

use crate::models::RequestLogModel;

use super::error::map_db_error;

const SELECT_COLUMNS: &str = "id, description, request, response, exception, server_ip, \
     stopwatch_result, stopwatch_duration, api_name, created_from_ip, created_from_ua, \
     created_by, create_time";

/// PostgreSQL implementation of RequestLogRepository
#[derive(Clone)]
pub struct PgRequestLogRepository {
    pool: PgPool,
}

impl PgRequestLogRepository {
    /// Create a new PgRequestLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestLogRepository for PgRequestLogRepository {
    /// Insert a record. `create_time` is intentionally not bound: the
    /// column default stamps persistence time, which may be later than
    /// the time the record was assembled and enqueued.
    #[instrument(skip(self, log), fields(id = %log.id, api_name = %log.api_name))]
    async fn insert(&self, log: &RequestLog) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO request_logs (id, description, request, response, exception, server_ip,
                   stopwatch_result, stopwatch_duration, api_name, created_from_ip,
                   created_from_ua, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(log.id.into_inner())
        .bind(&log.description)
        .bind(&log.request)
        .bind(&log.response)
        .bind(&log.exception)
        .bind(&log.server_ip)
        .bind(&log.stopwatch_result)
        .bind(log.stopwatch_duration)
        .bind(&log.api_name)
        .bind(&log.created_from_ip)
        .bind(&log.created_from_ua)
        .bind(&log.created_by)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: LogId) -> RepoResult<Option<RequestLog>> {
        let result = sqlx::query_as::<_, RequestLogModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM request_logs WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(RequestLog::from))
    }

    #[instrument(skip(self, query))]
    async fn search(&self, query: &LogQuery) -> RepoResult<Vec<RequestLog>> {
        let mut builder: QueryBuilder<'_, sqlx::Postgres> = QueryBuilder::new(format!(
            "SELECT {SELECT_COLUMNS} FROM request_logs WHERE 1 = 1"
        ));

        if let Some(api_name) = &query.api_name {
            builder.push(" AND api_name = ");
            builder.push_bind(api_name);
        }
        if let Some(ip) = &query.created_from_ip {
            builder.push(" AND created_from_ip = ");
            builder.push_bind(ip);
        }
        if let Some(keyword) = &query.keyword {
            let pattern = format!("%{keyword}%");
            builder.push(" AND (description LIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR request LIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR response LIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
        if let Some(from) = query.from {
            builder.push(" AND create_time >= ");
            builder.push_bind(from);
        }
        if let Some(to) = query.to {
            builder.push(" AND create_time < ");
            builder.push_bind(to);
        }
        if let Some(before) = query.before {
            builder.push(" AND id < ");
            builder.push_bind(before.into_inner());
        }

        builder.push(" ORDER BY id DESC LIMIT ");
        builder.push_bind(query.limit);

        let models = builder
            .build_query_as::<RequestLogModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(models.into_iter().map(RequestLog::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM request_logs WHERE create_time < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM request_logs")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(count)
    }
}
