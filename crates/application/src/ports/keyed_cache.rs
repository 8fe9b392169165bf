use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::cache::Expiry;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache service unavailable: {0}")]
    Unavailable(String),

    #[error("Cache codec error: {0}")]
    Codec(String),
}

/// Key/value store with per-key expiry and namespace isolation.
///
/// The same key in two namespaces addresses two independent entries. A
/// `None` namespace is its own partition.
///
/// Callers treat every error as a miss (for reads) or a skipped write, so an
/// implementation may fail freely when the backing service is unreachable.
#[async_trait]
pub trait KeyedCache: Send + Sync {
    /// Returns the stored payload, or `None` when absent or expired.
    async fn get(&self, key: &str, namespace: Option<&str>) -> Result<Option<Bytes>, CacheError>;

    /// Stores `value`, replacing any existing entry.
    async fn set(
        &self,
        key: &str,
        value: Bytes,
        expiry: Expiry,
        namespace: Option<&str>,
    ) -> Result<(), CacheError>;

    /// Stores `value` only when no live entry exists. Returns whether it was stored.
    async fn add_if_absent(
        &self,
        key: &str,
        value: Bytes,
        expiry: Expiry,
        namespace: Option<&str>,
    ) -> Result<bool, CacheError>;

    /// Removes the entry. Returns whether a live entry was removed.
    async fn delete(&self, key: &str, namespace: Option<&str>) -> Result<bool, CacheError>;
}
