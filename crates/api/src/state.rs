use rulefeed_application::cache::ResponseMemoizer;
use rulefeed_application::use_cases::{GetRuleListUseCase, RenderFeedUseCase};
use rulefeed_domain::config::FeedConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub get_rule_list: Arc<GetRuleListUseCase>,
    pub render_feed: Arc<RenderFeedUseCase>,
    pub response_cache: Arc<ResponseMemoizer>,
    pub feed: Arc<FeedConfig>,
}
