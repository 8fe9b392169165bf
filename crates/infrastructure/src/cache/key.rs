/// Cache key scoped to an optional namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamespacedKey {
    pub namespace: Option<String>,
    pub key: String,
}

impl NamespacedKey {
    #[inline]
    pub fn new(key: &str, namespace: Option<&str>) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            key: key.to_string(),
        }
    }
}
