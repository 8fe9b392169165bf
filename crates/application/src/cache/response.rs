use super::{CachePolicy, Expiry, KeyStrategy, MemoizeOptions, Memoizer};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::debug;

/// Observable state of an HTTP-style response.
///
/// Handlers build one per call and the caller sends whatever the memoizer
/// hands back, so a cached response is indistinguishable from a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CachedResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The request facts the response cache keys and gates on.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Request path including the query string, e.g. `/gfwlist?num=10`.
    pub path_and_query: String,
    pub authenticated: bool,
    pub user_agent: Option<String>,
}

impl RequestContext {
    pub fn new(path_and_query: impl Into<String>) -> Self {
        Self {
            path_and_query: path_and_query.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResponseCacheConfig {
    /// Overrides the default key of `path_and_query`.
    pub key: Option<KeyStrategy<RequestContext>>,
    pub expiry: Expiry,
    pub namespace: String,
    pub cacheable_status: Vec<u16>,
    /// Authenticated callers bypass the cache entirely.
    pub only_anonymous: bool,
}

impl Default for ResponseCacheConfig {
    fn default() -> Self {
        Self {
            key: None,
            expiry: Expiry::Never,
            namespace: "response".to_string(),
            cacheable_status: vec![200],
            only_anonymous: false,
        }
    }
}

/// Caches whole responses produced by a handler.
pub struct ResponseMemoizer {
    memoizer: Memoizer,
    config: ResponseCacheConfig,
}

impl ResponseMemoizer {
    pub fn new(memoizer: Memoizer, config: ResponseCacheConfig) -> Self {
        Self { memoizer, config }
    }

    pub fn key_for(&self, ctx: &RequestContext) -> String {
        match &self.config.key {
            Some(strategy) => strategy.key_for(ctx),
            None => ctx.path_and_query.clone(),
        }
    }

    /// Serve the cached response for `ctx`, or run `handler` once and cache
    /// its response when the status is cacheable.
    ///
    /// The returned response is the one to send on every path: hit, miss,
    /// non-cacheable status or bypass.
    pub async fn respond<E, H, Fut>(&self, ctx: &RequestContext, handler: H) -> Result<CachedResponse, E>
    where
        H: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachedResponse, E>>,
    {
        if self.config.only_anonymous && ctx.authenticated {
            debug!(path = %ctx.path_and_query, "Authenticated request, bypassing response cache");
            return handler().await;
        }

        let key = self.key_for(ctx);
        let options = MemoizeOptions::new()
            .with_expiry(self.config.expiry)
            .with_namespace(self.config.namespace.clone());
        let cacheable_status = &self.config.cacheable_status;

        self.memoizer
            .memoize_with_policy(&key, &options, || async move {
                handler().await.map(|response| {
                    if cacheable_status.contains(&response.status) {
                        CachePolicy::Cacheable(response)
                    } else {
                        CachePolicy::NonCacheable(response)
                    }
                })
            })
            .await
    }
}
