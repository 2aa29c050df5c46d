//! Durable key/value storage behind the session store.
//!
//! In production this is the visitor's server-side session (see
//! `middleware::session`). Tests use [`MemoryStorage`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

/// Failure reading or writing durable storage.
#[derive(Debug, Clone, Error)]
#[error("session storage unavailable: {0}")]
pub struct StorageError(pub String);

/// String key/value storage that outlives a single request.
///
/// Every value is a plain string. Removing an absent key is not an error.
pub trait DurableStorage: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Remove a value.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// In-process storage.
///
/// Clones share the same map, so a clone handed to a second
/// [`SessionStore`](super::SessionStore) behaves like a page reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored pair.
    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.values.lock().await.clone()
    }
}

impl DurableStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}
