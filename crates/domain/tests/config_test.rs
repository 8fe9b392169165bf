use rulefeed_domain::{CliOverrides, Config, ConfigError};

#[test]
fn test_defaults_are_valid() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert!(config.cache.enabled);
    assert_eq!(config.cache.response_ttl_secs, 0);
    assert_eq!(config.cache.response_namespace, "response");
    assert_eq!(config.cache.max_entries, 10_000);
    assert_eq!(config.feed.default_num, 20);
    assert_eq!(config.feed.max_window, 1000);
    assert_eq!(config.server.web_port, 8080);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = Config::from_toml(
        r#"
        [server]
        web_port = 9000

        [feed]
        max_window = 200
        aggregator_agents = ["FeedBurner", "Feedly"]
        "#,
    )
    .unwrap();

    assert_eq!(config.server.web_port, 9000);
    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.feed.max_window, 200);
    assert_eq!(config.feed.default_num, 20);
    assert!(config.feed.is_aggregator(Some("Feedly/1.0")));
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let result = Config::from_toml("[server\nweb_port = 1");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_missing_file_is_read_error() {
    let result = Config::from_file("/nonexistent/rulefeed.toml");
    assert!(matches!(result, Err(ConfigError::FileRead { .. })));
}

#[test]
fn test_overrides_win() {
    let config = Config::load(
        None,
        CliOverrides {
            bind_address: Some("127.0.0.1".to_string()),
            web_port: Some(3000),
            database_path: Some("/tmp/feed.db".to_string()),
            log_level: Some("debug".to_string()),
            disable_cache: true,
        },
    )
    .unwrap();

    assert_eq!(config.server.bind_address, "127.0.0.1");
    assert_eq!(config.server.web_port, 3000);
    assert_eq!(config.database.path, "/tmp/feed.db");
    assert_eq!(config.database.url(), "sqlite:/tmp/feed.db");
    assert_eq!(config.logging.level, "debug");
    assert!(!config.cache.enabled);
}

#[test]
fn test_default_num_above_window_rejected() {
    let mut config = Config::default();
    config.feed.default_num = 2000;

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("exceeds feed.max_window"));
}

#[test]
fn test_cache_capacity_from_toml() {
    let config = Config::from_toml("[cache]\nmax_entries = 500").unwrap();
    assert_eq!(config.cache.max_entries, 500);

    let unbounded = Config::from_toml("[cache]\nmax_entries = 0").unwrap();
    let err = unbounded.validate().unwrap_err();
    assert!(err.to_string().contains("cache.max_entries"));
}

#[test]
fn test_non_http_proxy_rejected() {
    let mut config = Config::default();
    config.feed.proxy_base_url = "ftp://feeds.example.com".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_proxy_url_joins_name() {
    let mut config = Config::default();
    config.feed.proxy_base_url = "https://proxy.example.com/".to_string();

    assert_eq!(config.feed.proxy_url("gfwlist"), "https://proxy.example.com/gfwlist");
}

#[test]
fn test_aggregator_detection() {
    let config = Config::default();

    assert!(config.feed.is_aggregator(Some("FeedBurner/1.0 (http://www.FeedBurner.com)")));
    assert!(!config.feed.is_aggregator(Some("Mozilla/5.0")));
    assert!(!config.feed.is_aggregator(None));
}
