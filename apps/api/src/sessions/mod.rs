//! Key-value session storage with per-entry TTL.
//!
//! Handlers hold an `Arc<dyn SessionStore>` from `AppState`; the backend is
//! picked at startup (Redis when `REDIS_URL` is set, in-process otherwise).

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod redis_store;

pub use memory::InMemorySessionStore;
pub use redis_store::RedisSessionStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Session payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value. The entry
    /// disappears once `ttl` has elapsed.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), SessionError>;

    /// Returns the live value for `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    async fn delete(&self, key: &str) -> Result<(), SessionError>;

    /// Backend label for logs.
    fn backend(&self) -> &'static str;
}
