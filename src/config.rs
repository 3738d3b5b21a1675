//! Add-on configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields a working configuration.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::{Display, EnumString};
use thiserror::Error;

use crate::addon::services::{DEFAULT_SERVER_COUNT, DEFAULT_SERVER_DOMAIN};
use crate::bridge::services::DEFAULT_CALL_TIMEOUT;
use crate::dispatch::{domain::DEVICE_NAME, services::DEFAULT_WINDOW_SIZE};
use crate::native::DEFAULT_CLIENT_LOCATIONS;

/// Supported logging output formats.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON lines.
    #[default]
    Json,
    /// Human-readable single line output.
    Compact,
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document is not valid.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Runtime configuration of the add-on core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddonConfig {
    /// Default bound for bridge calls, in milliseconds.
    pub call_timeout_ms: u64,
    /// Device-class label reported by `getHostInfo`.
    pub device_name: String,
    /// Domain hosting the regify application servers.
    pub server_domain: String,
    /// Number of numbered fallback servers.
    pub server_count: u8,
    /// Helper window width used until one is remembered.
    pub default_window_width: i64,
    /// Helper window height used until one is remembered.
    pub default_window_height: i64,
    /// Candidate locations of the native client, in priority order.
    pub client_locations: Vec<Utf8PathBuf>,
    /// Directory under which temporary workspaces are created. Defaults to
    /// the system temporary directory.
    pub temp_root: Option<Utf8PathBuf>,
    /// `tracing` filter directive.
    pub log_filter: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            call_timeout_ms: u64::try_from(DEFAULT_CALL_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
            device_name: DEVICE_NAME.to_owned(),
            server_domain: DEFAULT_SERVER_DOMAIN.to_owned(),
            server_count: DEFAULT_SERVER_COUNT,
            default_window_width: DEFAULT_WINDOW_SIZE,
            default_window_height: DEFAULT_WINDOW_SIZE,
            client_locations: DEFAULT_CLIENT_LOCATIONS
                .iter()
                .map(Utf8PathBuf::from)
                .collect(),
            temp_root: None,
            log_filter: "info".to_owned(),
            log_format: LogFormat::default(),
        }
    }
}

impl AddonConfig {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is malformed.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(document)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is malformed.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let read_error = |source| ConfigError::Read {
            path: path.to_owned(),
            source,
        };
        let file_name = path.file_name().ok_or_else(|| {
            read_error(std::io::Error::other("path must include a file name"))
        })?;
        let parent = path.parent().unwrap_or_else(|| Utf8Path::new("."));
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let document = dir.read_to_string(file_name).map_err(read_error)?;
        Self::from_json_str(&document)
    }

    /// Default bound for bridge calls.
    #[must_use]
    pub const fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    /// Directory under which temporary workspaces are created.
    #[must_use]
    pub fn temp_root(&self) -> Utf8PathBuf {
        self.temp_root.clone().unwrap_or_else(|| {
            Utf8PathBuf::from_path_buf(std::env::temp_dir())
                .unwrap_or_else(|path| Utf8PathBuf::from(path.to_string_lossy().into_owned()))
        })
    }
}
