use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One snapshot's worth of rule changes relative to the previous snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRecord {
    pub timestamp: DateTime<Utc>,
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl DiffRecord {
    pub fn new(timestamp: DateTime<Utc>, added: Vec<String>, removed: Vec<String>) -> Self {
        Self {
            timestamp,
            added,
            removed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
