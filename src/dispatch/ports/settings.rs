//! Persistent key/value settings of the add-on.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Result type for settings store operations.
pub type SettingsStoreResult<T> = Result<T, SettingsStoreError>;

/// Settings persistence contract.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Reads one setting. Returns `None` when the key is unset.
    async fn get(&self, key: &str) -> SettingsStoreResult<Option<Value>>;

    /// Stores a setting, replacing any previous value.
    async fn set(&self, key: &str, value: Value) -> SettingsStoreResult<()>;

    /// Deletes a setting. Deleting an unset key succeeds.
    async fn delete(&self, key: &str) -> SettingsStoreResult<()>;

    /// Returns every stored setting.
    async fn get_all(&self) -> SettingsStoreResult<Map<String, Value>>;
}

/// Errors returned by settings store implementations.
#[derive(Debug, Clone, Error)]
pub enum SettingsStoreError {
    /// The stored document could not be decoded.
    #[error("settings document is corrupt: {0}")]
    Corrupt(String),

    /// Persistence-layer failure.
    #[error("settings persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SettingsStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
