pub mod feed;

pub use feed::FeedQuery;
