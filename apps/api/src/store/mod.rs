//! Persistence port — a named-key JSON store with change subscriptions.
//!
//! Settings and conversation history live behind `KvStore` and are injected
//! through `AppState`. Two backends: `MemoryStore` (default, and for tests)
//! and `PgStore` (when `DATABASE_URL` is configured).

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::warn;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Buffered change notifications per store before slow subscribers lag.
const CHANGE_FEED_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Subscribes to changes of `key` made through this store after the call.
    fn subscribe(&self, key: &str) -> Subscription;
}

/// A write observed on the store. `value` is `None` for deletes.
#[derive(Debug, Clone)]
pub struct Change {
    pub key: String,
    pub value: Option<Value>,
}

/// Fan-out of changes shared by the store backends.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<Change>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self { sender }
    }
}

impl ChangeFeed {
    pub fn publish(&self, key: &str, value: Option<Value>) {
        // No receivers is not an error: nobody is watching.
        let _ = self.sender.send(Change {
            key: key.to_string(),
            value,
        });
    }

    pub fn subscribe(&self, key: &str) -> Subscription {
        Subscription {
            key: key.to_string(),
            receiver: self.sender.subscribe(),
        }
    }
}

/// Stream of new values for a single key.
pub struct Subscription {
    key: String,
    receiver: broadcast::Receiver<Change>,
}

impl Subscription {
    /// Waits for the next change of the subscribed key.
    /// Returns `None` once the store has been dropped.
    pub async fn next(&mut self) -> Option<Option<Value>> {
        loop {
            match self.receiver.recv().await {
                Ok(change) if change.key == self.key => return Some(change.value),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Subscription to {:?} lagged by {skipped} changes", self.key);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// Reads `key` as `T`, falling back to `T::default()` when the key is missing
/// or holds a value that no longer matches `T`.
pub async fn load_json<T>(store: &dyn KvStore, key: &str) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
{
    let Some(value) = store.get(key).await? else {
        return Ok(T::default());
    };
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        warn!("Stored value under {key:?} is malformed, using default: {e}");
        T::default()
    }))
}

pub async fn save_json<T: Serialize>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    store.set(key, serde_json::to_value(value)?).await
}
