use rulefeed_domain::{DiffRecord, DomainError, RuleList};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::ports::ChangeLogRepository;
use crate::use_cases::{GetChangeLogUseCase, GetRuleListUseCase};

/// Use case appending a crawled diff to a rule list's history.
pub struct RecordDiffUseCase {
    get_rule_list: Arc<GetRuleListUseCase>,
    change_log_repo: Arc<dyn ChangeLogRepository>,
    change_log: Arc<GetChangeLogUseCase>,
}

impl RecordDiffUseCase {
    pub fn new(
        get_rule_list: Arc<GetRuleListUseCase>,
        change_log_repo: Arc<dyn ChangeLogRepository>,
        change_log: Arc<GetChangeLogUseCase>,
    ) -> Self {
        Self {
            get_rule_list,
            change_log_repo,
            change_log,
        }
    }

    /// Empty diffs are skipped and leave the list unchanged.
    ///
    /// # Errors
    ///
    /// * `DomainError::RuleListNotFound` - If no list has this name
    /// * `DomainError::DatabaseError` - If the diff cannot be stored
    #[instrument(skip(self, diff))]
    pub async fn execute(&self, name: &str, diff: &DiffRecord) -> Result<RuleList, DomainError> {
        let rule_list = self.get_rule_list.execute(name).await?;
        if diff.is_empty() {
            debug!(name = %rule_list.name, "Empty diff, nothing recorded");
            return Ok(rule_list);
        }

        let updated = self.change_log_repo.record(&rule_list, diff).await?;
        self.change_log.invalidate(&rule_list).await;

        info!(
            name = %updated.name,
            revision = updated.revision,
            added = diff.added.len(),
            removed = diff.removed.len(),
            "Diff recorded"
        );
        Ok(updated)
    }
}
