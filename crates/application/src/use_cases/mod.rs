pub mod changelog;
pub mod feed;
pub mod rule_lists;

// Re-export use cases
pub use changelog::{GetChangeLogUseCase, RecordDiffUseCase};
pub use feed::{FeedWindow, RenderFeedUseCase, RenderedFeed};
pub use rule_lists::GetRuleListUseCase;
