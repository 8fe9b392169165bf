mod key;
mod memory;

pub use key::NamespacedKey;
pub use memory::InMemoryKeyedCache;
