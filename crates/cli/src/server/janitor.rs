use rulefeed_infrastructure::cache::InMemoryKeyedCache;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Periodically settles capacity eviction and drops expired entries while the
/// cache sees no traffic.
pub fn spawn_cache_janitor(store: Arc<InMemoryKeyedCache>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            store.run_pending_tasks().await;
            debug!(entries = store.entry_count(), "Cache janitor tick");
        }
    });
}
