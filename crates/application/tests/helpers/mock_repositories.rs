#![allow(dead_code)]
#![allow(unused_imports)]

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{TimeZone, Utc};
use rulefeed_application::cache::Expiry;
use rulefeed_application::ports::{
    CacheError, ChangeLogRepository, FeedDocument, FeedRenderer, KeyedCache, RuleListRepository,
};
use rulefeed_domain::{DiffRecord, DomainError, RuleList};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Mock KeyedCache
// ============================================================================

type NamespacedKey = (Option<String>, String);

#[derive(Clone, Default)]
pub struct MockKeyedCache {
    entries: Arc<RwLock<HashMap<NamespacedKey, (Bytes, Expiry)>>>,
    should_fail: Arc<AtomicBool>,
    gets: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl MockKeyedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call fail as if the cache service were down
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Inserts a raw payload, bypassing the trait
    pub async fn insert_raw(&self, key: &str, namespace: Option<&str>, payload: &[u8]) {
        self.entries.write().await.insert(
            (namespace.map(str::to_string), key.to_string()),
            (Bytes::copy_from_slice(payload), Expiry::Never),
        );
    }

    pub async fn contains(&self, key: &str, namespace: Option<&str>) -> bool {
        self.entries
            .read()
            .await
            .contains_key(&(namespace.map(str::to_string), key.to_string()))
    }

    pub async fn expiry_of(&self, key: &str, namespace: Option<&str>) -> Option<Expiry> {
        self.entries
            .read()
            .await
            .get(&(namespace.map(str::to_string), key.to_string()))
            .map(|(_, expiry)| *expiry)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), CacheError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("mock cache down".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyedCache for MockKeyedCache {
    async fn get(&self, key: &str, namespace: Option<&str>) -> Result<Option<Bytes>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .entries
            .read()
            .await
            .get(&(namespace.map(str::to_string), key.to_string()))
            .map(|(payload, _)| payload.clone()))
    }

    async fn set(
        &self,
        key: &str,
        value: Bytes,
        expiry: Expiry,
        namespace: Option<&str>,
    ) -> Result<(), CacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.entries.write().await.insert(
            (namespace.map(str::to_string), key.to_string()),
            (value, expiry),
        );
        Ok(())
    }

    async fn add_if_absent(
        &self,
        key: &str,
        value: Bytes,
        expiry: Expiry,
        namespace: Option<&str>,
    ) -> Result<bool, CacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut entries = self.entries.write().await;
        let slot = (namespace.map(str::to_string), key.to_string());
        if entries.contains_key(&slot) {
            return Ok(false);
        }
        entries.insert(slot, (value, expiry));
        Ok(true)
    }

    async fn delete(&self, key: &str, namespace: Option<&str>) -> Result<bool, CacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .entries
            .write()
            .await
            .remove(&(namespace.map(str::to_string), key.to_string()))
            .is_some())
    }
}

// ============================================================================
// Mock RuleListRepository
// ============================================================================

#[derive(Clone, Default)]
pub struct MockRuleListRepository {
    lists: Arc<RwLock<Vec<RuleList>>>,
}

impl MockRuleListRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lists(names: Vec<&str>) -> Self {
        let lists = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| make_rule_list(i as i64 + 1, name))
            .collect();
        Self {
            lists: Arc::new(RwLock::new(lists)),
        }
    }
}

#[async_trait]
impl RuleListRepository for MockRuleListRepository {
    async fn get_by_name(&self, name: &str) -> Result<Option<RuleList>, DomainError> {
        Ok(self
            .lists
            .read()
            .await
            .iter()
            .find(|list| list.name.eq_ignore_ascii_case(name))
            .cloned())
    }
}

// ============================================================================
// Mock ChangeLogRepository
// ============================================================================

#[derive(Clone, Default)]
pub struct MockChangeLogRepository {
    diffs: Arc<RwLock<HashMap<String, Vec<DiffRecord>>>>,
    fetches: Arc<AtomicUsize>,
    should_fail: Arc<AtomicBool>,
}

impl MockChangeLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores diffs for `name`; they are served newest first
    pub async fn set_diffs(&self, name: &str, mut diffs: Vec<DiffRecord>) {
        diffs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.diffs.write().await.insert(name.to_string(), diffs);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChangeLogRepository for MockChangeLogRepository {
    async fn fetch_diffs(
        &self,
        rule_list: &RuleList,
        limit: usize,
    ) -> Result<Vec<DiffRecord>, DomainError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("mock database down".to_string()));
        }
        Ok(self
            .diffs
            .read()
            .await
            .get(rule_list.name.as_ref())
            .map(|diffs| diffs.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn record(
        &self,
        rule_list: &RuleList,
        diff: &DiffRecord,
    ) -> Result<RuleList, DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("mock database down".to_string()));
        }
        let mut diffs = self.diffs.write().await;
        let history = diffs.entry(rule_list.name.to_string()).or_default();
        history.push(diff.clone());
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let mut updated = rule_list.clone().with_revision(rule_list.revision + 1);
        updated.date = updated.date.max(diff.timestamp);
        Ok(updated)
    }
}

// ============================================================================
// Mock FeedRenderer
// ============================================================================

/// Renders `name|link|<timestamp>,<timestamp>,...`
#[derive(Clone, Default)]
pub struct MockFeedRenderer {
    should_fail: Arc<AtomicBool>,
}

impl MockFeedRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }
}

impl FeedRenderer for MockFeedRenderer {
    fn content_type(&self) -> &'static str {
        "text/plain"
    }

    fn render(&self, feed: FeedDocument<'_>) -> Result<String, DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Render("mock renderer failed".to_string()));
        }
        let stamps: Vec<String> = feed
            .entries
            .iter()
            .map(|e| e.timestamp.format("%Y-%m-%d").to_string())
            .collect();
        Ok(format!("{}|{}|{}", feed.name, feed.link, stamps.join(",")))
    }
}

// ============================================================================
// Builders
// ============================================================================

pub fn make_rule_list(id: i64, name: &str) -> RuleList {
    RuleList::new(
        Some(id),
        Arc::from(name),
        Utc.with_ymd_and_hms(2011, 3, 31, 0, 0, 0).unwrap(),
    )
}

/// Diff dated `2011-03-<day>`
pub fn make_diff(day: u32, added: &[&str], removed: &[&str]) -> DiffRecord {
    DiffRecord::new(
        Utc.with_ymd_and_hms(2011, 3, day, 0, 0, 0).unwrap(),
        added.iter().map(|s| s.to_string()).collect(),
        removed.iter().map(|s| s.to_string()).collect(),
    )
}
