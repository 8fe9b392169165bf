use rulefeed_domain::{DomainError, RuleList};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::{FeedDocument, FeedRenderer};
use crate::use_cases::GetChangeLogUseCase;

/// Slice of the change log requested by a feed reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedWindow {
    pub start: usize,
    pub num: usize,
}

impl FeedWindow {
    pub fn new(start: usize, num: usize) -> Self {
        Self { start, num }
    }

    /// Number of entries that must be fetched to serve this window.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.num)
    }
}

#[derive(Debug, Clone)]
pub struct RenderedFeed {
    pub content_type: &'static str,
    pub body: String,
    pub entries: usize,
}

/// Use case rendering a window of a rule list's change log as a feed.
pub struct RenderFeedUseCase {
    change_log: Arc<GetChangeLogUseCase>,
    renderer: Arc<dyn FeedRenderer>,
    max_window: usize,
}

impl RenderFeedUseCase {
    pub fn new(
        change_log: Arc<GetChangeLogUseCase>,
        renderer: Arc<dyn FeedRenderer>,
        max_window: usize,
    ) -> Self {
        Self {
            change_log,
            renderer,
            max_window,
        }
    }

    /// # Errors
    ///
    /// * `DomainError::FetchWindowTooLarge` - If `start + num` exceeds the limit
    /// * `DomainError::DatabaseError` - If the diff history cannot be read
    /// * `DomainError::Render` - If the renderer fails
    #[instrument(skip(self, rule_list, link), fields(name = %rule_list.name))]
    pub async fn execute(
        &self,
        rule_list: &RuleList,
        window: FeedWindow,
        link: &str,
    ) -> Result<RenderedFeed, DomainError> {
        let fetch = window.end();
        if fetch > self.max_window {
            return Err(DomainError::FetchWindowTooLarge {
                requested: fetch,
                max: self.max_window,
            });
        }

        let logs = self.change_log.execute(rule_list, fetch).await?;
        let end = fetch.min(logs.len());
        let entries = logs.get(window.start..end).unwrap_or(&[]);

        let body = self.renderer.render(FeedDocument {
            name: &rule_list.name,
            link,
            entries,
        })?;

        debug!(entries = entries.len(), bytes = body.len(), "Feed rendered");
        Ok(RenderedFeed {
            content_type: self.renderer.content_type(),
            body,
            entries: entries.len(),
        })
    }
}
