use super::{format_timestamp, parse_timestamp};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rulefeed_application::ports::RuleListRepository;
use rulefeed_domain::{DomainError, RuleList};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{error, instrument};

type RuleListRow = (i64, String, String, i64);

pub struct SqliteRuleListRepository {
    pool: SqlitePool,
}

impl SqliteRuleListRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_rule_list(row: RuleListRow) -> Result<RuleList, DomainError> {
        let (id, name, date, revision) = row;
        Ok(RuleList::new(Some(id), Arc::from(name.as_str()), parse_timestamp(&date)?)
            .with_revision(revision))
    }

    /// Registers a new rule list. Used by the crawler side and by fixtures.
    #[instrument(skip(self))]
    pub async fn create(&self, name: &str, date: DateTime<Utc>) -> Result<RuleList, DomainError> {
        RuleList::validate_name(name).map_err(DomainError::InvalidRequest)?;

        let result = sqlx::query("INSERT INTO rule_lists (name, date) VALUES (?, ?)")
            .bind(name)
            .bind(format_timestamp(&date))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.to_string().contains("UNIQUE constraint failed") {
                    DomainError::InvalidRequest(format!("Rule list '{}' already exists", name))
                } else {
                    error!(error = %e, "Failed to create rule list");
                    DomainError::DatabaseError(e.to_string())
                }
            })?;

        Ok(RuleList::new(
            Some(result.last_insert_rowid()),
            Arc::from(name),
            date,
        ))
    }
}

#[async_trait]
impl RuleListRepository for SqliteRuleListRepository {
    #[instrument(skip(self))]
    async fn get_by_name(&self, name: &str) -> Result<Option<RuleList>, DomainError> {
        let row = sqlx::query_as::<_, RuleListRow>(
            "SELECT id, name, date,
                    COALESCE((SELECT MAX(c.id) FROM change_logs c
                              WHERE c.rule_list_id = rule_lists.id), 0)
             FROM rule_lists WHERE name = ? COLLATE NOCASE",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch rule list");
            DomainError::DatabaseError(e.to_string())
        })?;

        row.map(Self::row_to_rule_list).transpose()
    }
}
