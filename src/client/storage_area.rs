use std::collections::HashMap;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use crate::error::StorageError;

/// Durable key-value storage shared by every extension context. Each `set` replaces the
/// whole value under its key in a single write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageArea: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

#[derive(Default)]
pub struct MemoryStorageArea {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStorageArea {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageArea for MemoryStorageArea {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.values.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}
