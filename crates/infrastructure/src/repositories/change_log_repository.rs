use super::{format_timestamp, parse_timestamp};
use async_trait::async_trait;
use rulefeed_application::ports::ChangeLogRepository;
use rulefeed_domain::{DiffRecord, DomainError, RuleList};
use sqlx::SqlitePool;
use tracing::{debug, error, instrument};

type DiffRow = (String, String, String);

pub struct SqliteChangeLogRepository {
    pool: SqlitePool,
}

impl SqliteChangeLogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_diff(row: DiffRow) -> Result<DiffRecord, DomainError> {
        let (date, added, removed) = row;
        Ok(DiffRecord::new(
            parse_timestamp(&date)?,
            decode_rules(&added)?,
            decode_rules(&removed)?,
        ))
    }

    fn require_id(rule_list: &RuleList) -> Result<i64, DomainError> {
        rule_list.id.ok_or_else(|| {
            DomainError::InvalidRequest(format!("Rule list '{}' is not persisted", rule_list.name))
        })
    }
}

fn decode_rules(raw: &str) -> Result<Vec<String>, DomainError> {
    serde_json::from_str(raw)
        .map_err(|e| DomainError::Serialization(format!("Invalid rule array: {}", e)))
}

fn encode_rules(rules: &[String]) -> Result<String, DomainError> {
    serde_json::to_string(rules).map_err(|e| DomainError::Serialization(e.to_string()))
}

#[async_trait]
impl ChangeLogRepository for SqliteChangeLogRepository {
    #[instrument(skip(self), fields(list = %rule_list.name))]
    async fn fetch_diffs(
        &self,
        rule_list: &RuleList,
        limit: usize,
    ) -> Result<Vec<DiffRecord>, DomainError> {
        let id = Self::require_id(rule_list)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, DiffRow>(
            "SELECT date, added, removed FROM change_logs
             WHERE rule_list_id = ?
             ORDER BY date DESC, id DESC
             LIMIT ?",
        )
        .bind(id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch change logs");
            DomainError::DatabaseError(e.to_string())
        })?;

        debug!(count = rows.len(), "Fetched diff records");
        rows.into_iter().map(Self::row_to_diff).collect()
    }

    /// The returned list carries the new revision and a date no older than the diff.
    #[instrument(skip(self, diff), fields(list = %rule_list.name))]
    async fn record(
        &self,
        rule_list: &RuleList,
        diff: &DiffRecord,
    ) -> Result<RuleList, DomainError> {
        let id = Self::require_id(rule_list)?;
        let added = encode_rules(&diff.added)?;
        let removed = encode_rules(&diff.removed)?;
        let date = format_timestamp(&diff.timestamp);

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!(error = %e, "Failed to open transaction");
            DomainError::DatabaseError(e.to_string())
        })?;

        let revision = sqlx::query(
            "INSERT INTO change_logs (rule_list_id, date, added, removed) VALUES (?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&date)
        .bind(added)
        .bind(removed)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to record change log");
            DomainError::DatabaseError(e.to_string())
        })?
        .last_insert_rowid();

        sqlx::query("UPDATE rule_lists SET date = ? WHERE id = ? AND date < ?")
            .bind(&date)
            .bind(id)
            .bind(&date)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to bump rule list date");
                DomainError::DatabaseError(e.to_string())
            })?;

        tx.commit().await.map_err(|e| {
            error!(error = %e, "Failed to commit change log");
            DomainError::DatabaseError(e.to_string())
        })?;

        let mut updated = rule_list.clone().with_revision(revision);
        updated.date = updated.date.max(diff.timestamp);
        Ok(updated)
    }
}
