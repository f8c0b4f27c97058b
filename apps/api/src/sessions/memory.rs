use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::sessions::{SessionError, SessionStore};

struct Entry {
    value: String,
    expires_at: Instant,
}

/// Process-local store. Expired entries are dropped lazily on access.
#[derive(Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), SessionError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        // Keys that are never read again would otherwise linger.
        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| e.expires_at <= now) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn delete(&self, key: &str) -> Result<(), SessionError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let store = InMemorySessionStore::new();
        store
            .set("auto_apply:1", "{}".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(store.get("auto_apply:1").await.unwrap().as_deref(), Some("{}"));
        assert_eq!(store.get("auto_apply:2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_replaces_previous_value() {
        let store = InMemorySessionStore::new();
        let ttl = Duration::from_secs(60);
        store.set("k", "old".to_string(), ttl).await.unwrap();
        store.set("k", "new".to_string(), ttl).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let store = InMemorySessionStore::new();
        store
            .set("k", "v".to_string(), Duration::from_secs(30))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(29)).await;
        assert!(store.get("k").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(store.get("k").await.unwrap().is_none());
        assert!(store.entries.read().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_prunes_expired_entries() {
        let store = InMemorySessionStore::new();
        store
            .set("stale", "v".to_string(), Duration::from_secs(10))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(11)).await;
        store
            .set("fresh", "v".to_string(), Duration::from_secs(10))
            .await
            .unwrap();

        let entries = store.entries.read().await;
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key("fresh"));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemorySessionStore::new();
        store
            .set("k", "v".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        store.delete("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
        // deleting a missing key is fine
        store.delete("k").await.unwrap();
    }
}
