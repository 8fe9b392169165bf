use crate::diff_record::DiffRecord;
use crate::rule::{is_exception, sample_url, EXCEPTION_MARKER};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rules that newly block (or unblock) the same sample URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEvent {
    pub sample_url: String,
    pub rules: Vec<String>,
}

/// A change that is neither a plain block nor a plain unblock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustEvent {
    pub from: Vec<String>,
    pub to: Vec<String>,
    pub sample_url: String,
}

/// Classified summary of one diff record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub timestamp: DateTime<Utc>,
    pub block: Vec<RuleEvent>,
    pub unblock: Vec<RuleEvent>,
    pub rule_adjust: Vec<AdjustEvent>,
}

impl ChangeLogEntry {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            block: Vec::new(),
            unblock: Vec::new(),
            rule_adjust: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.block.is_empty() && self.unblock.is_empty() && self.rule_adjust.is_empty()
    }
}

#[derive(Default)]
struct UrlStatus {
    added: Vec<String>,
    removed: Vec<String>,
}

/// Classify the raw additions and removals of a diff into change events.
///
/// Exception rules always become adjust events in the order they are seen,
/// added before removed. All other rules are grouped by sample URL; groups are
/// emitted in first-seen order.
pub fn classify(diff: &DiffRecord) -> ChangeLogEntry {
    let mut entry = ChangeLogEntry::new(diff.timestamp);
    let mut order: Vec<String> = Vec::new();
    let mut by_url: HashMap<String, UrlStatus> = HashMap::new();

    let tagged = diff
        .added
        .iter()
        .map(|rule| (rule, true))
        .chain(diff.removed.iter().map(|rule| (rule, false)));

    for (rule, added) in tagged {
        if is_exception(rule) {
            entry.rule_adjust.push(AdjustEvent {
                from: Vec::new(),
                to: vec![rule.clone()],
                sample_url: sample_url(&rule[EXCEPTION_MARKER.len()..]),
            });
            continue;
        }

        let url = sample_url(rule);
        let status = by_url.entry(url.clone()).or_insert_with(|| {
            order.push(url);
            UrlStatus::default()
        });
        if added {
            status.added.push(rule.clone());
        } else {
            status.removed.push(rule.clone());
        }
    }

    for url in order {
        let Some(status) = by_url.remove(&url) else {
            continue;
        };
        match (status.added.is_empty(), status.removed.is_empty()) {
            (false, true) => entry.block.push(RuleEvent {
                sample_url: url,
                rules: status.added,
            }),
            (true, false) => entry.unblock.push(RuleEvent {
                sample_url: url,
                rules: status.removed,
            }),
            _ => entry.rule_adjust.push(AdjustEvent {
                from: status.removed,
                to: status.added,
                sample_url: url,
            }),
        }
    }

    entry
}
