//! Retention sweep
//!
//! A background task that deletes audit records older than the configured
//! retention window, on a fixed daily schedule. A failed sweep is logged
//! and waits for the next trigger; a schedule that cannot be parsed is a
//! startup configuration error, not something to discover at 01:41.

use std::sync::Arc;

use chrono::{DateTime, Duration, Timelike, Utc};
use tracing::{info, warn};

use rpclog_core::traits::{RepoResult, RequestLogRepository};
use rpclog_common::RetentionConfig;

/// Error for an unusable schedule expression
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("schedule must have 5 fields, got {0}")]
    WrongFieldCount(usize),

    #[error("invalid minute field: {0}")]
    InvalidMinute(String),

    #[error("invalid hour field: {0}")]
    InvalidHour(String),

    #[error("only daily schedules are supported, day/month/weekday must be '*': {0}")]
    UnsupportedField(String),
}

/// Daily fire time parsed from a cron-like "M H * * *" expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    minute: u32,
    hour: u32,
}

impl DailySchedule {
    /// Parse the "M H * * *" subset of cron
    pub fn parse(expression: &str) -> Result<Self, ScheduleError> {
        let fields: Vec<&str> = expression.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(ScheduleError::WrongFieldCount(fields.len()));
        }

        let minute: u32 = fields[0]
            .parse()
            .ok()
            .filter(|m| *m < 60)
            .ok_or_else(|| ScheduleError::InvalidMinute(fields[0].to_string()))?;
        let hour: u32 = fields[1]
            .parse()
            .ok()
            .filter(|h| *h < 24)
            .ok_or_else(|| ScheduleError::InvalidHour(fields[1].to_string()))?;

        for field in &fields[2..] {
            if *field != "*" {
                return Err(ScheduleError::UnsupportedField((*field).to_string()));
            }
        }

        Ok(Self { minute, hour })
    }

    /// Next fire instant strictly after `now`
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now
            .with_hour(self.hour)
            .and_then(|t| t.with_minute(self.minute))
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);

        if today > now {
            today
        } else {
            today + Duration::days(1)
        }
    }
}

/// Scheduled bulk deletion of aged audit records
pub struct RetentionSweeper {
    repo: Arc<dyn RequestLogRepository>,
    retention_days: i64,
    schedule: DailySchedule,
}

impl RetentionSweeper {
    /// Build a sweeper from configuration
    ///
    /// Fails fast when the schedule expression is unusable.
    pub fn new(
        repo: Arc<dyn RequestLogRepository>,
        config: &RetentionConfig,
    ) -> Result<Self, ScheduleError> {
        Ok(Self {
            repo,
            retention_days: config.days,
            schedule: DailySchedule::parse(&config.schedule)?,
        })
    }

    /// Delete everything older than the retention window
    ///
    /// Running twice with no inserts in between is a no-op the second
    /// time: the cutoff only moves forward.
    pub async fn sweep_once(&self) -> RepoResult<u64> {
        let cutoff = Utc::now() - Duration::days(self.retention_days);
        self.repo.delete_older_than(cutoff).await
    }

    /// Run forever, sweeping at each scheduled trigger
    pub async fn run(self) {
        info!(
            retention_days = self.retention_days,
            "retention sweeper started"
        );
        loop {
            let now = Utc::now();
            let next = self.schedule.next_after(now);
            let wait = (next - now)
                .to_std()
                .unwrap_or(std::time::Duration::ZERO);
            tokio::time::sleep(wait).await;

            match self.sweep_once().await {
                Ok(deleted) => {
                    info!(deleted, retention_days = self.retention_days, "retention sweep finished");
                }
                Err(err) => {
                    warn!(error = %err, "retention sweep failed, will retry at the next trigger");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use rpclog_core::entities::RequestLog;
    use rpclog_core::traits::LogQuery;
    use rpclog_core::value_objects::LogId;
    use std::sync::Mutex;

    #[test]
    fn test_parse_valid_expression() {
        let schedule = DailySchedule::parse("41 1 * * *").unwrap();
        assert_eq!(schedule, DailySchedule { minute: 41, hour: 1 });
    }

    #[test]
    fn test_parse_rejects_bad_expressions() {
        assert_eq!(
            DailySchedule::parse("41 1 * *"),
            Err(ScheduleError::WrongFieldCount(4))
        );
        assert!(matches!(
            DailySchedule::parse("61 1 * * *"),
            Err(ScheduleError::InvalidMinute(_))
        ));
        assert!(matches!(
            DailySchedule::parse("41 24 * * *"),
            Err(ScheduleError::InvalidHour(_))
        ));
        assert!(matches!(
            DailySchedule::parse("41 1 */2 * *"),
            Err(ScheduleError::UnsupportedField(_))
        ));
        assert!(matches!(
            DailySchedule::parse("x 1 * * *"),
            Err(ScheduleError::InvalidMinute(_))
        ));
    }

    #[test]
    fn test_next_after_later_today() {
        let schedule = DailySchedule::parse("41 1 * * *").unwrap();
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
        let next = schedule.next_after(now);
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 3, 10, 1, 41, 0).unwrap());
    }

    #[test]
    fn test_next_after_rolls_to_tomorrow() {
        let schedule = DailySchedule::parse("41 1 * * *").unwrap();
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 1, 41, 0).unwrap();
        let next = schedule.next_after(now);
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 3, 11, 1, 41, 0).unwrap());
    }

    /// Repository double that stores records with fixed create_time values
    struct AgedRepo {
        logs: Mutex<Vec<RequestLog>>,
    }

    impl AgedRepo {
        fn with_ages(days: &[i64]) -> Self {
            let logs = days
                .iter()
                .enumerate()
                .map(|(i, age)| {
                    let mut log = RequestLog::new(LogId::new(i as i64 + 1), "user.login");
                    log.create_time = Some(Utc::now() - Duration::days(*age));
                    log
                })
                .collect();
            Self {
                logs: Mutex::new(logs),
            }
        }

        fn remaining(&self) -> usize {
            self.logs.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RequestLogRepository for AgedRepo {
        async fn insert(&self, log: &RequestLog) -> rpclog_core::RepoResult<()> {
            self.logs.lock().unwrap().push(log.clone());
            Ok(())
        }

        async fn find_by_id(&self, _id: LogId) -> rpclog_core::RepoResult<Option<RequestLog>> {
            Ok(None)
        }

        async fn search(&self, _query: &LogQuery) -> rpclog_core::RepoResult<Vec<RequestLog>> {
            Ok(Vec::new())
        }

        async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> rpclog_core::RepoResult<u64> {
            let mut logs = self.logs.lock().unwrap();
            let before = logs.len();
            logs.retain(|l| l.create_time.map_or(true, |t| t >= cutoff));
            Ok((before - logs.len()) as u64)
        }

        async fn count(&self) -> rpclog_core::RepoResult<i64> {
            Ok(self.remaining() as i64)
        }
    }

    #[tokio::test]
    async fn test_sweep_deletes_only_aged_records() {
        let repo = Arc::new(AgedRepo::with_ages(&[200, 100, 1]));
        let sweeper = RetentionSweeper::new(
            repo.clone(),
            &RetentionConfig {
                days: 180,
                schedule: "41 1 * * *".to_string(),
            },
        )
        .unwrap();

        let deleted = sweeper.sweep_once().await.unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(repo.remaining(), 2);
    }

    #[tokio::test]
    async fn test_sweep_is_idempotent() {
        let repo = Arc::new(AgedRepo::with_ages(&[200, 190]));
        let sweeper = RetentionSweeper::new(repo.clone(), &RetentionConfig::default()).unwrap();

        assert_eq!(sweeper.sweep_once().await.unwrap(), 2);
        assert_eq!(sweeper.sweep_once().await.unwrap(), 0);
        assert_eq!(repo.remaining(), 0);
    }

    #[test]
    fn test_sweeper_rejects_bad_schedule() {
        let repo = Arc::new(AgedRepo::with_ages(&[]));
        let result = RetentionSweeper::new(
            repo,
            &RetentionConfig {
                days: 180,
                schedule: "whenever".to_string(),
            },
        );
        assert!(result.is_err());
    }
}
