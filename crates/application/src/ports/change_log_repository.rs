use async_trait::async_trait;
use rulefeed_domain::{DiffRecord, DomainError, RuleList};

/// Source of the raw diff history of a rule list.
#[async_trait]
pub trait ChangeLogRepository: Send + Sync {
    /// Fetches at most `limit` diff records of `rule_list`, newest first.
    async fn fetch_diffs(
        &self,
        rule_list: &RuleList,
        limit: usize,
    ) -> Result<Vec<DiffRecord>, DomainError>;

    /// Appends one diff to the history of `rule_list` and returns the list
    /// with its revision (and date, when the diff is newer) advanced.
    async fn record(
        &self,
        rule_list: &RuleList,
        diff: &DiffRecord,
    ) -> Result<RuleList, DomainError>;
}
