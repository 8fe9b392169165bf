#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use chrono::{TimeZone, Utc};
use rulefeed_api::{create_api_routes, AppState};
use rulefeed_application::cache::{Memoizer, ResponseCacheConfig, ResponseMemoizer};
use rulefeed_application::ports::ChangeLogRepository;
use rulefeed_application::use_cases::{
    GetChangeLogUseCase, GetRuleListUseCase, RecordDiffUseCase, RenderFeedUseCase,
};
use rulefeed_domain::config::{CacheConfig, FeedConfig};
use rulefeed_domain::{DiffRecord, RuleList};
use rulefeed_infrastructure::cache::InMemoryKeyedCache;
use rulefeed_infrastructure::feed::RssFeedRenderer;
use rulefeed_infrastructure::repositories::{SqliteChangeLogRepository, SqliteRuleListRepository};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

pub const FEEDBURNER_UA: &str = "FeedBurner/1.0 (http://www.FeedBurner.com)";
pub const BROWSER_UA: &str = "Mozilla/5.0";

pub struct TestApp {
    pub router: Router,
    pub lists: Arc<SqliteRuleListRepository>,
    pub logs: Arc<SqliteChangeLogRepository>,
    pub record_diff: Arc<RecordDiffUseCase>,
    pub cache: Arc<InMemoryKeyedCache>,
}

impl TestApp {
    pub async fn seed_list(&self, name: &str, days: u32) -> RuleList {
        let date = Utc.with_ymd_and_hms(2011, 3, 31, 8, 0, 0).unwrap();
        let list = self.lists.create(name, date).await.unwrap();
        for day in 1..=days {
            self.logs.record(&list, &diff(day)).await.unwrap();
        }
        list
    }
}

pub fn diff(day: u32) -> DiffRecord {
    DiffRecord::new(
        Utc.with_ymd_and_hms(2011, 3, day, 12, 0, 0).unwrap(),
        vec![format!("||day{day}.com")],
        vec![],
    )
}

pub async fn create_test_app(response: ResponseCacheConfig) -> TestApp {
    create_bounded_test_app(response, CacheConfig::default().max_entries).await
}

pub async fn create_bounded_test_app(
    response: ResponseCacheConfig,
    max_entries: u64,
) -> TestApp {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::migrate!("../../migrations").run(&pool).await.unwrap();

    let lists = Arc::new(SqliteRuleListRepository::new(pool.clone()));
    let logs = Arc::new(SqliteChangeLogRepository::new(pool));
    let cache = Arc::new(InMemoryKeyedCache::new(max_entries));
    let memoizer = Memoizer::new(cache.clone(), true);
    let feed = FeedConfig::default();

    let change_log = Arc::new(GetChangeLogUseCase::new(
        logs.clone(),
        memoizer.clone(),
        "changelog",
    ));
    let get_rule_list = Arc::new(GetRuleListUseCase::new(lists.clone()));
    let record_diff = Arc::new(RecordDiffUseCase::new(
        get_rule_list.clone(),
        logs.clone(),
        change_log.clone(),
    ));
    let state = AppState {
        get_rule_list,
        render_feed: Arc::new(RenderFeedUseCase::new(
            change_log,
            Arc::new(RssFeedRenderer::from_config(&feed)),
            feed.max_window,
        )),
        response_cache: Arc::new(ResponseMemoizer::new(memoizer, response)),
        feed: Arc::new(feed),
    };

    TestApp {
        router: create_api_routes(state),
        lists,
        logs,
        record_diff,
        cache,
    }
}

pub fn get(uri: &str, user_agent: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("host", "feeds.test")
        .header("user-agent", user_agent)
        .body(Body::empty())
        .unwrap()
}
