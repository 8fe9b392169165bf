use rulefeed_domain::{classify, ChangeLogEntry, DomainError, RuleList};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::cache::{MemoizeOptions, Memoizer};
use crate::ports::ChangeLogRepository;

/// Use case producing the classified change log of a rule list.
///
/// The whole log of a list is cached as one value, keyed by the list's
/// revision so a recorded diff makes the next request miss. A cached log
/// shorter than the requested window is rebuilt from the repository and
/// replaces the cached one; a first build is stored add-if-absent so
/// concurrent builders keep the first writer's value.
pub struct GetChangeLogUseCase {
    change_log_repo: Arc<dyn ChangeLogRepository>,
    memoizer: Memoizer,
    options: MemoizeOptions,
}

impl GetChangeLogUseCase {
    pub fn new(
        change_log_repo: Arc<dyn ChangeLogRepository>,
        memoizer: Memoizer,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            change_log_repo,
            memoizer,
            options: MemoizeOptions::new().with_namespace(namespace),
        }
    }

    pub fn cache_key(rule_list: &RuleList) -> String {
        format!("changelog/{}/{}", rule_list.name, rule_list.revision)
    }

    /// Drops the cached log of `rule_list` at its current revision.
    #[instrument(skip(self, rule_list), fields(name = %rule_list.name))]
    pub async fn invalidate(&self, rule_list: &RuleList) -> bool {
        let key = Self::cache_key(rule_list);
        self.memoizer
            .delete(&key, self.options.namespace.as_deref())
            .await
    }

    /// Returns at least the newest `window` entries when that many diffs exist.
    #[instrument(skip(self, rule_list), fields(name = %rule_list.name))]
    pub async fn execute(
        &self,
        rule_list: &RuleList,
        window: usize,
    ) -> Result<Vec<ChangeLogEntry>, DomainError> {
        let key = Self::cache_key(rule_list);
        let namespace = self.options.namespace.as_deref();

        let cached: Option<Vec<ChangeLogEntry>> = self.memoizer.get(&key, namespace).await;
        let stale = match cached {
            Some(logs) if logs.len() >= window => {
                debug!(entries = logs.len(), window, "Change log served from cache");
                return Ok(logs);
            }
            Some(logs) => {
                debug!(entries = logs.len(), window, "Cached change log too short");
                true
            }
            None => false,
        };

        let diffs = self.change_log_repo.fetch_diffs(rule_list, window).await?;
        let logs: Vec<ChangeLogEntry> = diffs.iter().map(classify).collect();

        if stale {
            self.memoizer.set(&key, &logs, &self.options).await;
        } else {
            self.memoizer.add(&key, &logs, &self.options).await;
        }

        info!(entries = logs.len(), window, "Change log rebuilt");
        Ok(logs)
    }
}
