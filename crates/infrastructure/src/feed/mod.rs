mod rss;

pub use rss::RssFeedRenderer;
