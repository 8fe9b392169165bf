use serde::{Deserialize, Serialize};

/// Cache layer configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Process-wide switch. When false every computation runs directly and
    /// nothing is read from or written to the cache (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// TTL of cached feed responses in seconds, 0 = no expiry (default: 0)
    #[serde(default)]
    pub response_ttl_secs: u64,

    /// Namespace for whole feed responses (default: "response")
    #[serde(default = "default_response_namespace")]
    pub response_namespace: String,

    /// Namespace for classified change logs (default: "changelog")
    #[serde(default = "default_changelog_namespace")]
    pub changelog_namespace: String,

    /// Skip the response cache for authenticated callers (default: false)
    #[serde(default)]
    pub only_anonymous: bool,

    /// Upper bound on stored entries across all namespaces. Least valuable
    /// entries are evicted past it (default: 10000)
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            response_ttl_secs: 0,
            response_namespace: default_response_namespace(),
            changelog_namespace: default_changelog_namespace(),
            only_anonymous: false,
            max_entries: default_max_entries(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_entries() -> u64 {
    10_000
}

fn default_response_namespace() -> String {
    "response".to_string()
}

fn default_changelog_namespace() -> String {
    "changelog".to_string()
}
