mod render_feed;

pub use render_feed::{FeedWindow, RenderFeedUseCase, RenderedFeed};
