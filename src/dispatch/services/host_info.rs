//! Host description and the per-install device identifier.

use super::DispatchResult;
use crate::dispatch::{
    domain::{HostInfo, OperatingMode, normalize_platform},
    ports::{RuntimeInfo, SettingsStore},
};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

/// Settings key holding the generated device identifier.
pub const MACHINE_ID_KEY: &str = "machineId";

/// Reads a setting as text. Unset and non-string values read as empty.
///
/// # Errors
///
/// Propagates settings store failures.
pub async fn setting_text(settings: &dyn SettingsStore, key: &str) -> DispatchResult<String> {
    Ok(match settings.get(key).await? {
        Some(Value::String(text)) => text,
        _ => String::new(),
    })
}

/// Returns the device identifier, generating and storing a UUID v4 on
/// first use.
///
/// # Errors
///
/// Propagates settings store failures.
pub async fn device_id(settings: &dyn SettingsStore) -> DispatchResult<String> {
    let existing = setting_text(settings, MACHINE_ID_KEY).await?;
    if !existing.is_empty() {
        return Ok(existing);
    }
    let generated = Uuid::new_v4().to_string();
    settings
        .set(MACHINE_ID_KEY, Value::String(generated.clone()))
        .await?;
    info!(device_id = %generated, "generated device identifier");
    Ok(generated)
}

/// Builds the host description returned by `getHostInfo`.
///
/// # Errors
///
/// Propagates settings store and runtime failures.
pub async fn describe_host(
    settings: &dyn SettingsStore,
    runtime: &dyn RuntimeInfo,
    device_name: &str,
) -> DispatchResult<HostInfo> {
    let developer = setting_text(settings, "developer").await?;
    let beta = setting_text(settings, "beta").await?;
    Ok(HostInfo {
        os: normalize_platform(&runtime.platform_os().await?),
        version: runtime.extension_version().await?,
        mode: OperatingMode::from_flags(&developer, &beta),
        device_name: device_name.to_owned(),
        device_id: device_id(settings).await?,
        proxy: String::new(),
    })
}
