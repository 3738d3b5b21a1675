//! Host description reported to the regify application.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Device-class label reported when no other is configured.
pub const DEVICE_NAME: &str = "thunderbird AddOn";

/// Release channel the add-on runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    /// Production servers.
    Release,
    /// Beta servers.
    Beta,
    /// A developer server named in the `developer` setting.
    Developer,
}

impl OperatingMode {
    /// Derives the mode from the persisted `developer` and `beta` flags.
    ///
    /// A non-empty developer setting wins over the beta flag.
    #[must_use]
    pub fn from_flags(developer: &str, beta: &str) -> Self {
        if !developer.is_empty() {
            Self::Developer
        } else if beta == "true" {
            Self::Beta
        } else {
            Self::Release
        }
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Beta => "beta",
            Self::Developer => "developer",
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalises a host platform name (`win` becomes `windows`).
#[must_use]
pub fn normalize_platform(os: &str) -> String {
    match os {
        "win" => "windows".to_owned(),
        other => other.to_owned(),
    }
}

/// Host description returned by `getHostInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInfo {
    /// Normalised platform name.
    pub os: String,
    /// Add-on version.
    pub version: String,
    /// Release channel.
    pub mode: OperatingMode,
    /// Fixed device-class label.
    #[serde(rename = "deviceName")]
    pub device_name: String,
    /// Stable per-install device identifier.
    #[serde(rename = "deviceID")]
    pub device_id: String,
    /// Proxy configuration; always empty.
    pub proxy: String,
}
