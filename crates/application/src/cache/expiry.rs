use std::time::Duration;

/// Largest value [`Expiry::from_legacy_seconds`] reads as relative (30 days).
pub const MAX_RELATIVE_EXPIRY_SECS: u64 = 60 * 60 * 24 * 30;

/// When a cached entry stops being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expiry {
    /// Kept until evicted or overwritten.
    #[default]
    Never,
    /// Relative to the time of the store.
    After(Duration),
    /// Absolute UNIX timestamp in seconds.
    At(u64),
}

impl Expiry {
    /// Interpret a single integer the way memcache-style services do:
    /// 0 never expires, up to 30 days is relative, anything larger is an
    /// absolute epoch timestamp.
    pub fn from_legacy_seconds(secs: u64) -> Self {
        match secs {
            0 => Expiry::Never,
            s if s <= MAX_RELATIVE_EXPIRY_SECS => Expiry::After(Duration::from_secs(s)),
            s => Expiry::At(s),
        }
    }

    /// Absolute expiry in UNIX seconds for an entry stored at `now_secs`.
    pub fn deadline(&self, now_secs: u64) -> Option<u64> {
        match self {
            Expiry::Never => None,
            Expiry::After(ttl) => Some(now_secs.saturating_add(ttl.as_secs())),
            Expiry::At(at) => Some(*at),
        }
    }
}
