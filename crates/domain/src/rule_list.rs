use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A named rule list whose snapshots produce the diff history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleList {
    pub id: Option<i64>,
    pub name: Arc<str>,
    /// Date of the latest snapshot.
    pub date: DateTime<Utc>,
    /// Id of the newest recorded diff, 0 when the history is empty. Grows
    /// every time a diff is recorded.
    #[serde(default)]
    pub revision: i64,
}

impl RuleList {
    pub fn new(id: Option<i64>, name: Arc<str>, date: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            date,
            revision: 0,
        }
    }

    pub fn with_revision(mut self, revision: i64) -> Self {
        self.revision = revision;
        self
    }

    /// Lookup key for a list name. Names are matched case-insensitively.
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub fn validate_name(name: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("Rule list name cannot be empty".to_string());
        }
        if name.len() > 100 {
            return Err("Rule list name cannot exceed 100 characters".to_string());
        }
        let valid_chars = name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.');
        if !valid_chars {
            return Err(
                "Rule list name can only contain alphanumeric characters, dots, hyphens, and underscores"
                    .to_string(),
            );
        }
        Ok(())
    }
}
