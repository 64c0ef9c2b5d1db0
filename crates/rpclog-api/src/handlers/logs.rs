//! Audit log handlers
//!
//! The entire surface is read-only: listing, detail, and export. There
//! are no create/update/delete routes, matching the append-only nature
//! of the underlying table.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use rpclog_core::traits::LogQuery;
use rpclog_service::{PaginatedLogs, RequestLogDetail};

use crate::extractors::Pagination;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Filter parameters shared by the list and export endpoints
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LogFilterParams {
    /// Exact method identifier match
    #[validate(length(max = 200))]
    pub api_name: Option<String>,
    /// Exact caller IP match
    #[validate(length(max = 45))]
    pub created_from_ip: Option<String>,
    /// Substring match over description, request, and response
    #[validate(length(min = 1, max = 200))]
    pub keyword: Option<String>,
    /// Lower bound on create_time (inclusive, RFC 3339)
    pub from: Option<DateTime<Utc>>,
    /// Upper bound on create_time (exclusive, RFC 3339)
    pub to: Option<DateTime<Utc>>,
}

impl LogFilterParams {
    fn into_query(self, pagination: Pagination) -> LogQuery {
        LogQuery {
            api_name: self.api_name,
            created_from_ip: self.created_from_ip,
            keyword: self.keyword,
            from: self.from,
            to: self.to,
            before: pagination.before,
            limit: pagination.limit,
        }
    }
}

/// List audit records, newest first
///
/// GET /logs
pub async fn list_logs(
    State(state): State<AppState>,
    pagination: Pagination,
    Query(filter): Query<LogFilterParams>,
) -> ApiResult<Json<PaginatedLogs>> {
    filter.validate()?;

    let page = state
        .query_service()
        .list(filter.into_query(pagination))
        .await?;
    Ok(Json(page))
}

/// Fetch one audit record by id
///
/// GET /logs/{log_id}
pub async fn get_log(
    State(state): State<AppState>,
    Path(log_id): Path<String>,
) -> ApiResult<Json<RequestLogDetail>> {
    let log_id = log_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid log_id format"))?;

    let detail = state.query_service().detail(log_id).await?;
    Ok(Json(detail))
}

/// Export matching audit records as CSV
///
/// GET /logs/export
pub async fn export_logs(
    State(state): State<AppState>,
    pagination: Pagination,
    Query(filter): Query<LogFilterParams>,
) -> ApiResult<impl IntoResponse> {
    filter.validate()?;

    let csv = state
        .query_service()
        .export_csv(filter.into_query(pagination))
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"request_logs.csv\"",
            ),
        ],
        csv,
    ))
}
