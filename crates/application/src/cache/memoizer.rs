use super::{CachePolicy, Expiry, KeyStrategy};
use crate::ports::KeyedCache;
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Expiry and namespace applied to stored values.
#[derive(Debug, Clone, Default)]
pub struct MemoizeOptions {
    pub expiry: Expiry,
    pub namespace: Option<String>,
}

impl MemoizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expiry(mut self, expiry: Expiry) -> Self {
        self.expiry = expiry;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Caches the results of computations in a [`KeyedCache`].
///
/// Values are stored as JSON. Only present results are stored: a computation
/// returning `None` is re-run on every call. When the cache service errors the
/// lookup counts as a miss and the store is skipped; the computation itself is
/// never skipped.
///
/// Concurrent misses on one key are not coalesced; each caller computes and
/// the last store wins.
#[derive(Clone)]
pub struct Memoizer {
    cache: Arc<dyn KeyedCache>,
    enabled: bool,
}

impl Memoizer {
    /// `enabled = false` turns every call into a direct computation.
    pub fn new(cache: Arc<dyn KeyedCache>, enabled: bool) -> Self {
        Self { cache, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return the cached value for `key`, or run `compute` and store its
    /// result when it is `Some`.
    ///
    /// Errors from `compute` propagate and leave the cache untouched.
    pub async fn memoize<T, E, F, Fut>(
        &self,
        key: &str,
        options: &MemoizeOptions,
        compute: F,
    ) -> Result<Option<T>, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
    {
        if !self.enabled {
            return compute().await;
        }

        let namespace = options.namespace.as_deref();
        if let Some(hit) = self.get(key, namespace).await {
            return Ok(Some(hit));
        }

        debug!(key, namespace = ?namespace, "Memoized value missed");
        let value = compute().await?;
        if let Some(ref present) = value {
            self.set(key, present, options).await;
        }
        Ok(value)
    }

    /// Like [`memoize`](Self::memoize), but the computation decides per call
    /// whether its value may be stored. Non-cacheable values are still
    /// returned to the caller.
    pub async fn memoize_with_policy<T, E, F, Fut>(
        &self,
        key: &str,
        options: &MemoizeOptions,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachePolicy<T>, E>>,
    {
        if !self.enabled {
            return compute().await.map(CachePolicy::into_inner);
        }

        let namespace = options.namespace.as_deref();
        if let Some(hit) = self.get(key, namespace).await {
            return Ok(hit);
        }

        debug!(key, namespace = ?namespace, "Memoized value missed");
        match compute().await? {
            CachePolicy::Cacheable(value) => {
                self.set(key, &value, options).await;
                Ok(value)
            }
            CachePolicy::NonCacheable(value) => {
                debug!(key, "Result not cacheable, skipping store");
                Ok(value)
            }
        }
    }

    /// Build a callable that memoizes `f` under `config`.
    pub fn wrap<A, F>(&self, config: MemoizeConfig<A>, f: F) -> Memoized<A, F> {
        Memoized {
            memoizer: self.clone(),
            config,
            f,
        }
    }

    /// Read and decode a cached value. Absent, undecodable and unreachable
    /// entries all read as `None`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str, namespace: Option<&str>) -> Option<T> {
        if !self.enabled {
            return None;
        }

        match self.cache.get(key, namespace).await {
            Ok(Some(payload)) => match serde_json::from_slice(&payload) {
                Ok(value) => {
                    debug!(key, namespace = ?namespace, "Cache HIT");
                    Some(value)
                }
                Err(e) => {
                    warn!(key, namespace = ?namespace, error = %e, "Discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key, namespace = ?namespace, error = %e, "Cache lookup failed, computing directly");
                None
            }
        }
    }

    /// Encode and store a value, replacing any existing entry.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, options: &MemoizeOptions) {
        if !self.enabled {
            return;
        }
        let Some(payload) = encode(key, value) else {
            return;
        };

        let namespace = options.namespace.as_deref();
        match self.cache.set(key, payload, options.expiry, namespace).await {
            Ok(()) => debug!(key, namespace = ?namespace, "Cache STORE"),
            Err(e) => warn!(key, namespace = ?namespace, error = %e, "Cache store failed"),
        }
    }

    /// Encode and store a value unless a live entry exists. Returns whether
    /// this call stored it.
    pub async fn add<T: Serialize>(&self, key: &str, value: &T, options: &MemoizeOptions) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(payload) = encode(key, value) else {
            return false;
        };

        let namespace = options.namespace.as_deref();
        match self
            .cache
            .add_if_absent(key, payload, options.expiry, namespace)
            .await
        {
            Ok(added) => {
                debug!(key, namespace = ?namespace, added, "Cache ADD");
                added
            }
            Err(e) => {
                warn!(key, namespace = ?namespace, error = %e, "Cache add failed");
                false
            }
        }
    }

    /// Drop the entry for `key`. Returns whether a live entry was removed.
    pub async fn delete(&self, key: &str, namespace: Option<&str>) -> bool {
        if !self.enabled {
            return false;
        }

        match self.cache.delete(key, namespace).await {
            Ok(removed) => {
                debug!(key, namespace = ?namespace, removed, "Cache DELETE");
                removed
            }
            Err(e) => {
                warn!(key, namespace = ?namespace, error = %e, "Cache delete failed");
                false
            }
        }
    }
}

fn encode<T: Serialize>(key: &str, value: &T) -> Option<Bytes> {
    match serde_json::to_vec(value) {
        Ok(bytes) => Some(Bytes::from(bytes)),
        Err(e) => {
            warn!(key, error = %e, "Failed to encode value for cache");
            None
        }
    }
}

/// Key strategy and store options for a wrapped computation.
#[derive(Debug, Clone)]
pub struct MemoizeConfig<A> {
    pub key: KeyStrategy<A>,
    pub options: MemoizeOptions,
}

impl<A> MemoizeConfig<A> {
    pub fn new(key: KeyStrategy<A>) -> Self {
        Self {
            key,
            options: MemoizeOptions::default(),
        }
    }

    pub fn with_expiry(mut self, expiry: Expiry) -> Self {
        self.options.expiry = expiry;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.options.namespace = Some(namespace.into());
        self
    }
}

/// A computation bound to a [`Memoizer`], produced by [`Memoizer::wrap`].
pub struct Memoized<A, F> {
    memoizer: Memoizer,
    config: MemoizeConfig<A>,
    f: F,
}

impl<A, F> Memoized<A, F> {
    pub async fn call<T, E, Fut>(&self, args: A) -> Result<Option<T>, E>
    where
        T: Serialize + DeserializeOwned,
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
    {
        let key = self.config.key.key_for(&args);
        self.memoizer
            .memoize(&key, &self.config.options, || (self.f)(args))
            .await
    }
}
