use async_trait::async_trait;
use rulefeed_domain::{DomainError, RuleList};

/// Read access to named rule lists.
#[async_trait]
pub trait RuleListRepository: Send + Sync {
    /// Retrieves a rule list by name, ignoring case.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(RuleList))` - If the list exists
    /// * `Ok(None)` - If no list has this name
    /// * `Err(DomainError)` - If retrieval fails
    async fn get_by_name(&self, name: &str) -> Result<Option<RuleList>, DomainError>;
}
