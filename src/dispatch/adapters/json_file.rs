//! Settings persisted as a JSON document on disk.
//!
//! The document is re-read on every access and rewritten in full on every
//! change, so several stores pointed at the same file observe each other's
//! writes.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::dispatch::ports::{SettingsStore, SettingsStoreError, SettingsStoreResult};

/// Settings store backed by a JSON object file.
#[derive(Debug, Clone)]
pub struct JsonFileSettingsStore {
    directory: Utf8PathBuf,
    file_name: String,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileSettingsStore {
    /// Creates a store for `file_name` inside `directory`.
    ///
    /// The file is created on first write.
    #[must_use]
    pub fn new(directory: impl Into<Utf8PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the full path of the backing file.
    #[must_use]
    pub fn path(&self) -> Utf8PathBuf {
        self.directory.join(&self.file_name)
    }

    fn open_dir(path: &Utf8Path) -> SettingsStoreResult<Dir> {
        Dir::open_ambient_dir(path, ambient_authority()).map_err(SettingsStoreError::persistence)
    }

    fn load(&self) -> SettingsStoreResult<Map<String, Value>> {
        let dir = Self::open_dir(&self.directory)?;
        let contents = match dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(SettingsStoreError::persistence(err)),
        };
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(settings)) => Ok(settings),
            Ok(_) => Err(SettingsStoreError::Corrupt(format!(
                "{} does not hold a JSON object",
                self.path()
            ))),
            Err(err) => Err(SettingsStoreError::Corrupt(err.to_string())),
        }
    }

    fn save(&self, settings: &Map<String, Value>) -> SettingsStoreResult<()> {
        let dir = Self::open_dir(&self.directory)?;
        let rendered =
            serde_json::to_string_pretty(settings).map_err(SettingsStoreError::persistence)?;
        dir.write(&self.file_name, rendered)
            .map_err(SettingsStoreError::persistence)
    }

    async fn modify(&self, apply: impl FnOnce(&mut Map<String, Value>) + Send) -> SettingsStoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut settings = self.load()?;
        apply(&mut settings);
        self.save(&settings)
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn get(&self, key: &str) -> SettingsStoreResult<Option<Value>> {
        Ok(self.load()?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> SettingsStoreResult<()> {
        self.modify(|settings| {
            settings.insert(key.to_owned(), value);
        })
        .await
    }

    async fn delete(&self, key: &str) -> SettingsStoreResult<()> {
        self.modify(|settings| {
            settings.remove(key);
        })
        .await
    }

    async fn get_all(&self) -> SettingsStoreResult<Map<String, Value>> {
        self.load()
    }
}
