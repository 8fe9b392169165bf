use rulefeed_application::cache::{Expiry, Memoizer, ResponseCacheConfig};
use rulefeed_domain::Config;
use rulefeed_infrastructure::cache::InMemoryKeyedCache;
use std::sync::Arc;
use tracing::info;

pub struct Caches {
    pub store: Arc<InMemoryKeyedCache>,
    pub memoizer: Memoizer,
}

impl Caches {
    pub fn new(config: &Config) -> Self {
        let store = Arc::new(InMemoryKeyedCache::new(config.cache.max_entries));
        let memoizer = Memoizer::new(store.clone(), config.cache.enabled);

        info!(
            enabled = config.cache.enabled,
            max_entries = config.cache.max_entries,
            "Cache layer ready"
        );
        Self { store, memoizer }
    }

    pub fn response_config(config: &Config) -> ResponseCacheConfig {
        ResponseCacheConfig {
            key: None,
            expiry: Expiry::from_legacy_seconds(config.cache.response_ttl_secs),
            namespace: config.cache.response_namespace.clone(),
            only_anonymous: config.cache.only_anonymous,
            ..ResponseCacheConfig::default()
        }
    }
}
