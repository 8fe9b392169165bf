use serde::{Deserialize, Serialize};

/// Feed endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    /// Items returned when `num` is omitted (default: 20)
    #[serde(default = "default_num")]
    pub default_num: usize,

    /// Upper bound on `start + num` (default: 1000)
    #[serde(default = "default_max_window")]
    pub max_window: usize,

    /// Feed aggregation proxy that plain requests are redirected to
    #[serde(default = "default_proxy_base_url")]
    pub proxy_base_url: String,

    /// User-agent tokens of aggregator fetchers that skip the redirect
    #[serde(default = "default_aggregator_agents")]
    pub aggregator_agents: Vec<String>,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_author")]
    pub author: String,

    #[serde(default = "default_description")]
    pub description: String,
}

impl FeedConfig {
    pub fn is_aggregator(&self, user_agent: Option<&str>) -> bool {
        user_agent.is_some_and(|ua| {
            self.aggregator_agents
                .iter()
                .any(|token| ua.contains(token.as_str()))
        })
    }

    pub fn proxy_url(&self, name: &str) -> String {
        format!("{}/{}", self.proxy_base_url.trim_end_matches('/'), name)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_num: default_num(),
            max_window: default_max_window(),
            proxy_base_url: default_proxy_base_url(),
            aggregator_agents: default_aggregator_agents(),
            language: default_language(),
            author: default_author(),
            description: default_description(),
        }
    }
}

fn default_num() -> usize {
    20
}

fn default_max_window() -> usize {
    1000
}

fn default_proxy_base_url() -> String {
    "http://feeds.feedburner.com".to_string()
}

fn default_aggregator_agents() -> Vec<String> {
    vec!["FeedBurner".to_string()]
}

fn default_language() -> String {
    "zh".to_string()
}

fn default_author() -> String {
    "gfwlist".to_string()
}

fn default_description() -> String {
    "beta".to_string()
}
