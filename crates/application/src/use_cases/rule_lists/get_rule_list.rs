use rulefeed_domain::{DomainError, RuleList};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::RuleListRepository;

/// Use case for resolving a rule list by its (case-insensitive) name.
pub struct GetRuleListUseCase {
    rule_list_repo: Arc<dyn RuleListRepository>,
}

impl GetRuleListUseCase {
    pub fn new(rule_list_repo: Arc<dyn RuleListRepository>) -> Self {
        Self { rule_list_repo }
    }

    /// # Errors
    ///
    /// * `DomainError::RuleListNotFound` - If no list has this name
    /// * `DomainError::DatabaseError` - If the lookup fails
    #[instrument(skip(self))]
    pub async fn execute(&self, name: &str) -> Result<RuleList, DomainError> {
        let name = RuleList::normalize_name(name);
        let rule_list = self
            .rule_list_repo
            .get_by_name(&name)
            .await?
            .ok_or_else(|| DomainError::RuleListNotFound(name.clone()))?;

        debug!(name = %rule_list.name, date = %rule_list.date, "Rule list resolved");
        Ok(rule_list)
    }
}
