//! Window, notification, runtime, and text-conversion host services.

use crate::dispatch::domain::{Notification, WindowGeometry, WindowId, WindowSpec};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for host API calls.
pub type HostApiResult<T> = Result<T, HostApiError>;

/// Popup window management.
#[async_trait]
pub trait WindowHost: Send + Sync {
    /// Opens a popup window.
    async fn create_popup(&self, spec: &WindowSpec) -> HostApiResult<WindowId>;

    /// Returns `true` while the window is open.
    async fn exists(&self, window: WindowId) -> HostApiResult<bool>;

    /// Closes a window.
    async fn remove(&self, window: WindowId) -> HostApiResult<()>;

    /// Returns the current geometry of an open window.
    async fn geometry(&self, window: WindowId) -> HostApiResult<Option<WindowGeometry>>;
}

/// User notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Shows a notification.
    async fn notify(&self, notification: &Notification) -> HostApiResult<()>;
}

/// Facts about the running host.
#[async_trait]
pub trait RuntimeInfo: Send + Sync {
    /// Platform name as the host reports it (for example `win`, `linux`).
    async fn platform_os(&self) -> HostApiResult<String>;

    /// Version of the installed add-on.
    async fn extension_version(&self) -> HostApiResult<String>;
}

/// HTML to plain-text conversion.
#[async_trait]
pub trait TextConverter: Send + Sync {
    /// Converts HTML to plain text, using format=flowed wrapping when
    /// `flowed` is set.
    async fn convert_to_plain_text(&self, html: &str, flowed: bool) -> HostApiResult<String>;
}

/// Errors returned by host API adapters.
#[derive(Debug, Clone, Error)]
pub enum HostApiError {
    /// The addressed entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind (message, tab, attachment, window).
        entity: &'static str,
        /// Host identifier.
        id: u64,
    },

    /// Generic runtime failure.
    #[error("host runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl HostApiError {
    /// Wraps a runtime error from a host adapter.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }

    /// Builds a not-found error.
    #[must_use]
    pub const fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }
}
