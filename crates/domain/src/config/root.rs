use super::{CacheConfig, ConfigError, DatabaseConfig, FeedConfig, LoggingConfig, ServerConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values passed on the command line take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub web_port: Option<u16>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
    pub disable_cache: bool,
}

impl Config {
    /// Load configuration from `config_path` (defaults when `None`) and apply
    /// CLI overrides on top.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(path) = overrides.database_path {
            self.database.path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.disable_cache {
            self.cache.enabled = false;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.web_port == 0 {
            return Err(ConfigError::Invalid("server.web_port cannot be 0".into()));
        }
        if self.feed.default_num == 0 {
            return Err(ConfigError::Invalid("feed.default_num cannot be 0".into()));
        }
        if self.feed.max_window == 0 {
            return Err(ConfigError::Invalid("feed.max_window cannot be 0".into()));
        }
        if self.feed.default_num > self.feed.max_window {
            return Err(ConfigError::Invalid(format!(
                "feed.default_num ({}) exceeds feed.max_window ({})",
                self.feed.default_num, self.feed.max_window
            )));
        }
        if self.cache.max_entries == 0 {
            return Err(ConfigError::Invalid("cache.max_entries cannot be 0".into()));
        }
        let proxy = &self.feed.proxy_base_url;
        if !proxy.starts_with("http://") && !proxy.starts_with("https://") {
            return Err(ConfigError::Invalid(
                "feed.proxy_base_url must start with http:// or https://".into(),
            ));
        }
        Ok(())
    }
}
