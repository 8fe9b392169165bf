use rulefeed_application::use_cases::FeedWindow;
use rulefeed_domain::DomainError;
use serde::Deserialize;

/// Query string of a feed request.
///
/// Numbers are kept as text so a malformed value maps to our own 400
/// instead of the extractor's rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedQuery {
    pub start: Option<String>,
    pub num: Option<String>,
    /// Present (with any value) to skip the aggregator redirect.
    pub raw: Option<String>,
}

impl FeedQuery {
    pub fn wants_raw(&self) -> bool {
        self.raw.is_some()
    }

    pub fn window(&self, default_num: usize) -> Result<FeedWindow, DomainError> {
        let start = parse_count("start", self.start.as_deref(), 0)?;
        let num = parse_count("num", self.num.as_deref(), default_num)?;
        Ok(FeedWindow::new(start, num))
    }
}

fn parse_count(field: &str, raw: Option<&str>, default: usize) -> Result<usize, DomainError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| {
            DomainError::InvalidRequest(format!("'{}' must be a non-negative integer", field))
        }),
    }
}
