use std::fmt;
use std::sync::Arc;

/// Outcome of a computation run under a memoizer.
///
/// Both variants carry the value back to the caller; only `Cacheable` is
/// written to the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachePolicy<T> {
    Cacheable(T),
    NonCacheable(T),
}

impl<T> CachePolicy<T> {
    pub fn into_inner(self) -> T {
        match self {
            CachePolicy::Cacheable(value) | CachePolicy::NonCacheable(value) => value,
        }
    }

    pub fn is_cacheable(&self) -> bool {
        matches!(self, CachePolicy::Cacheable(_))
    }
}

/// How a cache key is obtained for a call taking `A`.
///
/// Derived keys must be pure functions of the arguments.
pub enum KeyStrategy<A: ?Sized> {
    Static(String),
    Derived(Arc<dyn Fn(&A) -> String + Send + Sync>),
}

impl<A: ?Sized> KeyStrategy<A> {
    pub fn fixed(key: impl Into<String>) -> Self {
        KeyStrategy::Static(key.into())
    }

    pub fn derived(f: impl Fn(&A) -> String + Send + Sync + 'static) -> Self {
        KeyStrategy::Derived(Arc::new(f))
    }

    pub fn key_for(&self, args: &A) -> String {
        match self {
            KeyStrategy::Static(key) => key.clone(),
            KeyStrategy::Derived(f) => f(args),
        }
    }
}

impl<A: ?Sized> Clone for KeyStrategy<A> {
    fn clone(&self) -> Self {
        match self {
            KeyStrategy::Static(key) => KeyStrategy::Static(key.clone()),
            KeyStrategy::Derived(f) => KeyStrategy::Derived(Arc::clone(f)),
        }
    }
}

impl<A: ?Sized> fmt::Debug for KeyStrategy<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyStrategy::Static(key) => f.debug_tuple("Static").field(key).finish(),
            KeyStrategy::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}
