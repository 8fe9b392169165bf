mod change_log_repository;
mod feed_renderer;
mod keyed_cache;
mod rule_list_repository;

pub use change_log_repository::ChangeLogRepository;
pub use feed_renderer::{FeedDocument, FeedRenderer};
pub use keyed_cache::{CacheError, KeyedCache};
pub use rule_list_repository::RuleListRepository;
