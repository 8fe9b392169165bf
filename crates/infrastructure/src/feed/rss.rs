use chrono::{DateTime, Datelike, Utc};
use rulefeed_application::ports::{FeedDocument, FeedRenderer};
use rulefeed_domain::config::FeedConfig;
use rulefeed_domain::{AdjustEvent, ChangeLogEntry, DomainError, RuleEvent};
use std::fmt::Write;

const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

/// Renders change-log entries as an RSS 2.0 document.
#[derive(Debug, Clone)]
pub struct RssFeedRenderer {
    language: String,
    author: String,
    description: String,
}

impl RssFeedRenderer {
    pub fn new(
        language: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            author: author.into(),
            description: description.into(),
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(&config.language, &config.author, &config.description)
    }

    fn write_document(&self, out: &mut String, feed: FeedDocument<'_>) -> std::fmt::Result {
        out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        out.push_str("<rss version=\"2.0\"><channel>");
        write_element(out, "title", &format!("{} 更新记录", feed.name))?;
        write_element(out, "link", feed.link)?;
        write_element(out, "description", &self.description)?;
        write_element(out, "language", &self.language)?;
        if let Some(latest) = feed.entries.iter().map(|e| e.timestamp).max() {
            write_element(out, "lastBuildDate", &http_date(&latest))?;
        }

        for entry in feed.entries {
            out.push_str("<item>");
            write_element(out, "title", &item_title(feed.name, entry))?;
            write_element(out, "link", feed.link)?;
            let mut html = String::new();
            write_entry_html(&mut html, entry)?;
            write_element(out, "description", &html)?;
            write_element(out, "author", &self.author)?;
            write_element(out, "pubDate", &http_date(&entry.timestamp))?;
            out.push_str("</item>");
        }

        out.push_str("</channel></rss>\n");
        Ok(())
    }
}

impl FeedRenderer for RssFeedRenderer {
    fn content_type(&self) -> &'static str {
        RSS_CONTENT_TYPE
    }

    fn render(&self, feed: FeedDocument<'_>) -> Result<String, DomainError> {
        let mut out = String::with_capacity(512 + feed.entries.len() * 512);
        self.write_document(&mut out, feed)
            .map_err(|e| DomainError::Render(e.to_string()))?;
        Ok(out)
    }
}

/// `"<M>月<D>日 <name> 更新: 增加 <blocks> 条, 删除 <unblocks> 条"`
pub(crate) fn item_title(name: &str, entry: &ChangeLogEntry) -> String {
    format!(
        "{}月{}日 {} 更新: 增加 {} 条, 删除 {} 条",
        entry.timestamp.month(),
        entry.timestamp.day(),
        name,
        entry.block.len(),
        entry.unblock.len()
    )
}

fn write_entry_html(html: &mut String, entry: &ChangeLogEntry) -> std::fmt::Result {
    write_rule_events(html, "新增屏蔽", &entry.block)?;
    write_rule_events(html, "解除屏蔽", &entry.unblock)?;
    write_adjust_events(html, &entry.rule_adjust)
}

fn write_rule_events(html: &mut String, heading: &str, events: &[RuleEvent]) -> std::fmt::Result {
    if events.is_empty() {
        return Ok(());
    }
    write!(html, "<h3>{}</h3><ul>", heading)?;
    for event in events {
        html.push_str("<li>");
        write_sample_link(html, &event.sample_url)?;
        write!(html, " {}</li>", escape(&event.rules.join(" ")))?;
    }
    html.push_str("</ul>");
    Ok(())
}

fn write_adjust_events(html: &mut String, events: &[AdjustEvent]) -> std::fmt::Result {
    if events.is_empty() {
        return Ok(());
    }
    html.push_str("<h3>规则调整</h3><ul>");
    for event in events {
        html.push_str("<li>");
        write_sample_link(html, &event.sample_url)?;
        write!(
            html,
            " {} &rarr; {}</li>",
            escape(&event.from.join(" ")),
            escape(&event.to.join(" "))
        )?;
    }
    html.push_str("</ul>");
    Ok(())
}

fn write_sample_link(html: &mut String, url: &str) -> std::fmt::Result {
    let url = escape(url);
    write!(html, "<a href=\"{url}\">{url}</a>")
}

fn write_element(out: &mut String, tag: &str, text: &str) -> std::fmt::Result {
    write!(out, "<{tag}>{}</{tag}>", escape(text))
}

fn http_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Escapes text for XML element content and attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
