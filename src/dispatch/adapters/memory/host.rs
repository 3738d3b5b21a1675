//! In-memory window host, notifier, runtime facts, and text converter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use super::lock_poisoned;
use crate::dispatch::{
    domain::{Notification, WindowGeometry, WindowId, WindowSpec},
    ports::{HostApiError, HostApiResult, Notifier, RuntimeInfo, TextConverter, WindowHost},
};

/// Popup windows kept in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWindowHost {
    state: Arc<RwLock<WindowState>>,
}

#[derive(Debug, Default)]
struct WindowState {
    windows: BTreeMap<WindowId, WindowSpec>,
    next_id: u64,
}

impl InMemoryWindowHost {
    /// Creates a host with no windows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the specs of all open windows, oldest first.
    #[must_use]
    pub fn open_windows(&self) -> Vec<(WindowId, WindowSpec)> {
        self.state
            .read()
            .map(|state| {
                state
                    .windows
                    .iter()
                    .map(|(id, spec)| (*id, spec.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Simulates the user moving or resizing a window.
    pub fn move_window(&self, window: WindowId, geometry: WindowGeometry) {
        if let Ok(mut state) = self.state.write()
            && let Some(spec) = state.windows.get_mut(&window)
        {
            spec.geometry = geometry;
        }
    }

    /// Simulates the user closing a window.
    pub fn close_by_user(&self, window: WindowId) {
        if let Ok(mut state) = self.state.write() {
            state.windows.remove(&window);
        }
    }
}

#[async_trait]
impl WindowHost for InMemoryWindowHost {
    async fn create_popup(&self, spec: &WindowSpec) -> HostApiResult<WindowId> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.next_id += 1;
        let window = WindowId::new(state.next_id);
        state.windows.insert(window, spec.clone());
        Ok(window)
    }

    async fn exists(&self, window: WindowId) -> HostApiResult<bool> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.windows.contains_key(&window))
    }

    async fn remove(&self, window: WindowId) -> HostApiResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state
            .windows
            .remove(&window)
            .map(|_| ())
            .ok_or(HostApiError::not_found("window", window.value()))
    }

    async fn geometry(&self, window: WindowId) -> HostApiResult<Option<WindowGeometry>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.windows.get(&window).map(|spec| spec.geometry))
    }
}

/// Notifier that records every notification with the time it was shown.
///
/// Clones share the recorded history.
pub struct RecordingNotifier<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
    shown: Arc<RwLock<Vec<(DateTime<Utc>, Notification)>>>,
}

impl<C> Clone for RecordingNotifier<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            clock: Arc::clone(&self.clock),
            shown: Arc::clone(&self.shown),
        }
    }
}

impl<C> fmt::Debug for RecordingNotifier<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingNotifier")
            .field("shown", &self.shown)
            .finish_non_exhaustive()
    }
}

impl<C> RecordingNotifier<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a notifier stamping entries with `clock`.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock: Arc::new(clock),
            shown: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Returns recorded notifications, oldest first.
    #[must_use]
    pub fn shown(&self) -> Vec<Notification> {
        self.history()
            .into_iter()
            .map(|(_, notification)| notification)
            .collect()
    }

    /// Returns recorded notifications with their timestamps.
    #[must_use]
    pub fn history(&self) -> Vec<(DateTime<Utc>, Notification)> {
        self.shown
            .read()
            .map(|shown| shown.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl<C> Notifier for RecordingNotifier<C>
where
    C: Clock + Send + Sync,
{
    async fn notify(&self, notification: &Notification) -> HostApiResult<()> {
        let mut shown = self.shown.write().map_err(lock_poisoned)?;
        shown.push((self.clock.utc(), notification.clone()));
        Ok(())
    }
}

/// Fixed platform and version facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRuntimeInfo {
    os: String,
    version: String,
}

impl StaticRuntimeInfo {
    /// Creates runtime facts reporting `os` and `version`.
    #[must_use]
    pub fn new(os: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            version: version.into(),
        }
    }
}

#[async_trait]
impl RuntimeInfo for StaticRuntimeInfo {
    async fn platform_os(&self) -> HostApiResult<String> {
        Ok(self.os.clone())
    }

    async fn extension_version(&self) -> HostApiResult<String> {
        Ok(self.version.clone())
    }
}

/// Minimal HTML to text converter: line-break tags become newlines and all
/// other tags are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagStrippingConverter;

#[async_trait]
impl TextConverter for TagStrippingConverter {
    async fn convert_to_plain_text(&self, html: &str, flowed: bool) -> HostApiResult<String> {
        let mut text = String::with_capacity(html.len());
        let mut tag: Option<String> = None;
        for ch in html.chars() {
            if let Some(name) = tag.as_mut() {
                if ch == '>' {
                    if is_line_break(name) {
                        text.push('\n');
                    }
                    tag = None;
                } else {
                    name.push(ch);
                }
            } else if ch == '<' {
                tag = Some(String::new());
            } else {
                text.push(ch);
            }
        }
        if let Some(unclosed) = tag {
            text.push('<');
            text.push_str(&unclosed);
        }
        let trimmed = text.trim_end_matches('\n');
        Ok(if flowed {
            trimmed
                .lines()
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            trimmed.to_owned()
        })
    }
}

fn is_line_break(tag: &str) -> bool {
    let name = tag.trim().trim_end_matches('/').trim().to_ascii_lowercase();
    matches!(name.as_str(), "br" | "/p" | "/div")
}
