//! The single helper window hosting the regify application.

use super::{DispatchResult, SessionState};
use crate::dispatch::{
    domain::{WindowGeometry, WindowId, WindowSpec},
    ports::{SettingsStore, WindowHost},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Width and height used when no geometry was remembered.
pub const DEFAULT_WINDOW_SIZE: i64 = 600;

/// Opens, closes, and remembers the geometry of the helper window.
///
/// At most one helper window is open; opening a new one closes the
/// previous one first.
#[derive(Clone)]
pub struct HelperWindow {
    windows: Arc<dyn WindowHost>,
    settings: Arc<dyn SettingsStore>,
    session: Arc<SessionState>,
    default_width: i64,
    default_height: i64,
}

impl HelperWindow {
    /// Creates a manager using [`DEFAULT_WINDOW_SIZE`] for both axes.
    #[must_use]
    pub fn new(
        windows: Arc<dyn WindowHost>,
        settings: Arc<dyn SettingsStore>,
        session: Arc<SessionState>,
    ) -> Self {
        Self {
            windows,
            settings,
            session,
            default_width: DEFAULT_WINDOW_SIZE,
            default_height: DEFAULT_WINDOW_SIZE,
        }
    }

    /// Overrides the size used when none was remembered.
    #[must_use]
    pub const fn with_default_size(mut self, width: i64, height: i64) -> Self {
        self.default_width = width;
        self.default_height = height;
        self
    }

    async fn integer_setting(&self, key: &str) -> DispatchResult<Option<i64>> {
        Ok(self.settings.get(key).await?.as_ref().and_then(Value::as_i64))
    }

    /// Returns the geometry the next window opens with.
    ///
    /// # Errors
    ///
    /// Propagates settings store failures.
    pub async fn stored_geometry(&self) -> DispatchResult<WindowGeometry> {
        Ok(WindowGeometry {
            width: self
                .integer_setting("width")
                .await?
                .unwrap_or(self.default_width),
            height: self
                .integer_setting("height")
                .await?
                .unwrap_or(self.default_height),
            top: self.integer_setting("top").await?,
            left: self.integer_setting("left").await?,
        })
    }

    /// Opens the helper window on `url`, closing any previous one.
    ///
    /// # Errors
    ///
    /// Propagates settings and window host failures.
    pub async fn show(&self, url: &str) -> DispatchResult<WindowId> {
        self.close().await?;
        let spec = WindowSpec {
            url: url.to_owned(),
            geometry: self.stored_geometry().await?,
        };
        let window = self.windows.create_popup(&spec).await?;
        if let Some(stale) = self.session.replace_open_window(window) {
            debug!(%stale, "helper window replaced");
        }
        debug!(%window, url, "helper window opened");
        Ok(window)
    }

    /// Closes the helper window. Returns `true` when a window was closed.
    ///
    /// # Errors
    ///
    /// Propagates window host failures.
    pub async fn close(&self) -> DispatchResult<bool> {
        let Some(window) = self.session.take_open_window() else {
            return Ok(false);
        };
        if !self.windows.exists(window).await? {
            return Ok(false);
        }
        self.windows.remove(window).await?;
        debug!(%window, "helper window closed");
        Ok(true)
    }

    /// Returns `true` while the helper window is open.
    ///
    /// # Errors
    ///
    /// Propagates window host failures.
    pub async fn is_open(&self) -> DispatchResult<bool> {
        match self.session.open_window() {
            Some(window) => Ok(self.windows.exists(window).await?),
            None => Ok(false),
        }
    }

    /// Persists the open window's size and position. Returns `false` when
    /// no window is open.
    ///
    /// # Errors
    ///
    /// Propagates settings and window host failures.
    pub async fn remember_geometry(&self) -> DispatchResult<bool> {
        let Some(window) = self.session.open_window() else {
            return Ok(false);
        };
        let Some(geometry) = self.windows.geometry(window).await? else {
            return Ok(false);
        };
        self.settings.set("width", Value::from(geometry.width)).await?;
        self.settings.set("height", Value::from(geometry.height)).await?;
        for (key, position) in [("top", geometry.top), ("left", geometry.left)] {
            match position {
                Some(value) => self.settings.set(key, Value::from(value)).await?,
                None => self.settings.delete(key).await?,
            }
        }
        Ok(true)
    }
}
