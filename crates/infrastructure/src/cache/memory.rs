use super::NamespacedKey;
use async_trait::async_trait;
use bytes::Bytes;
use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};
use rulefeed_application::cache::Expiry;
use rulefeed_application::ports::{CacheError, KeyedCache};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::debug;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[derive(Debug, Clone)]
struct StoredValue {
    payload: Bytes,
    /// Unix seconds; `None` never expires.
    expires_at: Option<u64>,
}

impl StoredValue {
    fn new(payload: Bytes, expiry: Expiry, now: u64) -> Self {
        Self {
            payload,
            expires_at: expiry.deadline(now),
        }
    }

    #[inline]
    fn is_expired(&self, now: u64) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }

    fn time_to_live(&self) -> Option<Duration> {
        self.expires_at
            .map(|at| Duration::from_secs(at.saturating_sub(now_secs())))
    }
}

/// Hands each entry's own deadline to the eviction timer.
struct DeadlineExpiry;

impl moka::Expiry<NamespacedKey, StoredValue> for DeadlineExpiry {
    fn expire_after_create(
        &self,
        _key: &NamespacedKey,
        value: &StoredValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.time_to_live()
    }

    fn expire_after_update(
        &self,
        _key: &NamespacedKey,
        value: &StoredValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.time_to_live()
    }
}

/// Process-local [`KeyedCache`] holding at most `max_entries` values.
///
/// Past capacity the least valuable entries are evicted. Expired entries read
/// as absent immediately and are dropped by the eviction timer.
pub struct InMemoryKeyedCache {
    entries: Cache<NamespacedKey, StoredValue>,
}

impl InMemoryKeyedCache {
    pub fn new(max_entries: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(DeadlineExpiry)
            .build();
        Self { entries }
    }

    /// Approximate until [`run_pending_tasks`](Self::run_pending_tasks) settles it.
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Apply buffered writes, capacity eviction and expiry now.
    pub async fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks().await;
    }
}

#[async_trait]
impl KeyedCache for InMemoryKeyedCache {
    async fn get(&self, key: &str, namespace: Option<&str>) -> Result<Option<Bytes>, CacheError> {
        let cache_key = NamespacedKey::new(key, namespace);
        let now = now_secs();

        Ok(self
            .entries
            .get(&cache_key)
            .await
            .filter(|value| !value.is_expired(now))
            .map(|value| value.payload))
    }

    async fn set(
        &self,
        key: &str,
        value: Bytes,
        expiry: Expiry,
        namespace: Option<&str>,
    ) -> Result<(), CacheError> {
        let stored = StoredValue::new(value, expiry, now_secs());
        self.entries
            .insert(NamespacedKey::new(key, namespace), stored)
            .await;
        Ok(())
    }

    async fn add_if_absent(
        &self,
        key: &str,
        value: Bytes,
        expiry: Expiry,
        namespace: Option<&str>,
    ) -> Result<bool, CacheError> {
        let now = now_secs();
        let stored = StoredValue::new(value, expiry, now);

        let result = self
            .entries
            .entry(NamespacedKey::new(key, namespace))
            .and_compute_with(|existing| {
                let op = match existing {
                    Some(entry) if !entry.value().is_expired(now) => Op::Nop,
                    _ => Op::Put(stored),
                };
                std::future::ready(op)
            })
            .await;

        Ok(matches!(
            result,
            CompResult::Inserted(_) | CompResult::ReplacedWith(_)
        ))
    }

    async fn delete(&self, key: &str, namespace: Option<&str>) -> Result<bool, CacheError> {
        let now = now_secs();
        let removed = self
            .entries
            .remove(&NamespacedKey::new(key, namespace))
            .await;

        let live = removed.is_some_and(|value| !value.is_expired(now));
        if live {
            debug!(key, "Removed cache entry");
        }
        Ok(live)
    }
}
