//! Storage for users, orders and conversation history.
//!
//! Domain stores ([`UserDirectory`], [`OrderBook`]) sit on top of a small
//! key/value interface so a persistent backend can replace [`MemoryStore`]
//! without touching the HTTP layer or the classifier.

mod history;
mod orders;
mod users;

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::Result;

pub use history::{ChatExchange, ConversationLog};
pub use orders::{Order, OrderBook, OrderItem, OrderStatus, ShippingInfo};
pub use users::{User, UserDirectory, UserProfile};

/// Key/value storage backend.
#[async_trait]
pub trait KeyValueStore<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    /// Get a value by key.
    async fn get(&self, key: &str) -> Result<Option<V>>;

    /// Insert or replace a value.
    async fn set(&self, key: &str, value: V) -> Result<()>;

    /// Insert only if the key is absent. Returns `false` when the key exists.
    async fn insert_if_absent(&self, key: &str, value: V) -> Result<bool>;

    /// Remove a value, returning it if present.
    async fn remove(&self, key: &str) -> Result<Option<V>>;

    /// Check whether a key exists.
    async fn contains(&self, key: &str) -> Result<bool>;

    /// All stored values, in no particular order.
    async fn values(&self) -> Result<Vec<V>>;

    /// Number of stored values.
    async fn len(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

/// In-memory key/value storage for testing and simple deployments.
pub struct MemoryStore<V> {
    entries: RwLock<HashMap<String, V>>,
}

impl<V> MemoryStore<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V> KeyValueStore<V> for MemoryStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Result<Option<V>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: V) -> Result<()> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn insert_if_absent(&self, key: &str, value: V) -> Result<bool> {
        let mut entries = self.entries.write();
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value);
        Ok(true)
    }

    async fn remove(&self, key: &str) -> Result<Option<V>> {
        Ok(self.entries.write().remove(key))
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.entries.read().contains_key(key))
    }

    async fn values(&self) -> Result<Vec<V>> {
        Ok(self.entries.read().values().cloned().collect())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.entries.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store() {
        let store: MemoryStore<u32> = MemoryStore::new();
        assert!(store.is_empty().await.unwrap());

        store.set("a", 1).await.unwrap();
        store.set("b", 2).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some(1));
        assert!(store.contains("b").await.unwrap());
        assert_eq!(store.len().await.unwrap(), 2);

        store.set("a", 10).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some(10));

        let mut values = store.values().await.unwrap();
        values.sort();
        assert_eq!(values, vec![2, 10]);

        assert_eq!(store.remove("a").await.unwrap(), Some(10));
        assert_eq!(store.remove("a").await.unwrap(), None);
        assert!(!store.contains("a").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_if_absent() {
        let store: MemoryStore<&'static str> = MemoryStore::new();
        assert!(store.insert_if_absent("k", "first").await.unwrap());
        assert!(!store.insert_if_absent("k", "second").await.unwrap());
        assert_eq!(store.get("k").await.unwrap(), Some("first"));
    }
}
