use rulefeed_domain::{ChangeLogEntry, DomainError};

/// Everything a renderer needs to produce one feed document.
#[derive(Debug, Clone, Copy)]
pub struct FeedDocument<'a> {
    pub name: &'a str,
    pub link: &'a str,
    pub entries: &'a [ChangeLogEntry],
}

/// Serializes change-log entries into a syndication document.
pub trait FeedRenderer: Send + Sync {
    /// MIME type of the rendered document.
    fn content_type(&self) -> &'static str;

    fn render(&self, feed: FeedDocument<'_>) -> Result<String, DomainError>;
}
