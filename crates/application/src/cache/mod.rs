//! Memoization over a [`KeyedCache`](crate::ports::KeyedCache).
//!
//! - [`Memoizer`] caches the result of an arbitrary computation.
//! - [`ResponseMemoizer`] caches whole HTTP-style responses.
//!
//! Both honour a process-wide enable switch injected at construction and
//! degrade to direct computation when the cache service fails.

mod expiry;
mod memoizer;
mod policy;
mod response;

pub use expiry::{Expiry, MAX_RELATIVE_EXPIRY_SECS};
pub use memoizer::{MemoizeConfig, MemoizeOptions, Memoized, Memoizer};
pub use policy::{CachePolicy, KeyStrategy};
pub use response::{CachedResponse, RequestContext, ResponseCacheConfig, ResponseMemoizer};
