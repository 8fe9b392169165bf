use super::{Caches, Repositories};
use rulefeed_api::AppState;
use rulefeed_application::cache::ResponseMemoizer;
use rulefeed_application::use_cases::{
    GetChangeLogUseCase, GetRuleListUseCase, RecordDiffUseCase, RenderFeedUseCase,
};
use rulefeed_domain::Config;
use rulefeed_infrastructure::feed::RssFeedRenderer;
use std::sync::Arc;

pub struct UseCases {
    pub get_rule_list: Arc<GetRuleListUseCase>,
    pub render_feed: Arc<RenderFeedUseCase>,
    pub record_diff: Arc<RecordDiffUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, repos: &Repositories, caches: &Caches) -> Self {
        let change_log = Arc::new(GetChangeLogUseCase::new(
            repos.change_logs.clone(),
            caches.memoizer.clone(),
            config.cache.changelog_namespace.clone(),
        ));

        let get_rule_list = Arc::new(GetRuleListUseCase::new(repos.rule_lists.clone()));

        Self {
            record_diff: Arc::new(RecordDiffUseCase::new(
                get_rule_list.clone(),
                repos.change_logs.clone(),
                change_log.clone(),
            )),
            get_rule_list,
            render_feed: Arc::new(RenderFeedUseCase::new(
                change_log,
                Arc::new(RssFeedRenderer::from_config(&config.feed)),
                config.feed.max_window,
            )),
        }
    }

    pub fn into_app_state(self, config: &Config, caches: &Caches) -> AppState {
        AppState {
            get_rule_list: self.get_rule_list,
            render_feed: self.render_feed,
            response_cache: Arc::new(ResponseMemoizer::new(
                caches.memoizer.clone(),
                Caches::response_config(config),
            )),
            feed: Arc::new(config.feed.clone()),
        }
    }
}
