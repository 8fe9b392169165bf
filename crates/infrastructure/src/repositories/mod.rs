pub mod change_log_repository;
pub mod rule_list_repository;

pub use change_log_repository::SqliteChangeLogRepository;
pub use rule_list_repository::SqliteRuleListRepository;

use chrono::{DateTime, NaiveDateTime, Utc};
use rulefeed_domain::DomainError;

/// Column format of every `DATETIME` value, interpreted as UTC.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    // Older rows may carry fractional seconds
    let trimmed = raw.split('.').next().unwrap_or(raw);
    NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| DomainError::DatabaseError(format!("Invalid timestamp '{}': {}", raw, e)))
}

pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
