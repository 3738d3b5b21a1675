//! In-memory settings store.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::{Arc, RwLock};

use crate::dispatch::ports::{SettingsStore, SettingsStoreError, SettingsStoreResult};

/// Thread-safe in-memory settings store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettingsStore {
    state: Arc<RwLock<Map<String, Value>>>,
}

impl InMemorySettingsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `values`.
    #[must_use]
    pub fn with_values<K: Into<String>>(values: impl IntoIterator<Item = (K, Value)>) -> Self {
        let map = values
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        Self {
            state: Arc::new(RwLock::new(map)),
        }
    }
}

fn poisoned(err: impl ToString) -> SettingsStoreError {
    SettingsStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get(&self, key: &str) -> SettingsStoreResult<Option<Value>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> SettingsStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.insert(key.to_owned(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> SettingsStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.remove(key);
        Ok(())
    }

    async fn get_all(&self) -> SettingsStoreResult<Map<String, Value>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.clone())
    }
}
