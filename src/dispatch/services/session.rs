//! Mutable add-on session values shared by the dispatcher and the add-on
//! workflow.

use crate::dispatch::domain::{ComposeTabId, MessageId, WindowId};
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::{PoisonError, RwLock};

/// Point-in-time copy of the session values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Message selected in the message view, if it carries a regimail.
    pub selected_message: Option<MessageId>,
    /// Compose tab that started the current send flow.
    pub compose_tab: Option<ComposeTabId>,
    /// Helper window currently open.
    pub open_window: Option<WindowId>,
    /// Cached location of the native client executable.
    pub client_path: Option<Utf8PathBuf>,
}

/// Shared session values.
///
/// Reads return copies; the lock is never held across an await.
#[derive(Debug, Default)]
pub struct SessionState {
    values: RwLock<SessionSnapshot>,
}

impl SessionState {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every session value.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.read(SessionSnapshot::clone)
    }

    fn read<T>(&self, inspect: impl FnOnce(&SessionSnapshot) -> T) -> T {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        inspect(&values)
    }

    fn update<T>(&self, apply: impl FnOnce(&mut SessionSnapshot) -> T) -> T {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut values)
    }

    /// Returns the selected message.
    #[must_use]
    pub fn selected_message(&self) -> Option<MessageId> {
        self.read(|values| values.selected_message)
    }

    /// Replaces the selected message.
    pub fn set_selected_message(&self, message: Option<MessageId>) {
        self.update(|values| values.selected_message = message);
    }

    /// Returns the active compose tab.
    #[must_use]
    pub fn compose_tab(&self) -> Option<ComposeTabId> {
        self.read(|values| values.compose_tab)
    }

    /// Replaces the active compose tab.
    pub fn set_compose_tab(&self, tab: Option<ComposeTabId>) {
        self.update(|values| values.compose_tab = tab);
    }

    /// Returns the open helper window.
    #[must_use]
    pub fn open_window(&self) -> Option<WindowId> {
        self.read(|values| values.open_window)
    }

    /// Records a newly opened helper window and returns the previous one.
    pub fn replace_open_window(&self, window: WindowId) -> Option<WindowId> {
        self.update(|values| values.open_window.replace(window))
    }

    /// Forgets the open helper window and returns it.
    pub fn take_open_window(&self) -> Option<WindowId> {
        self.update(|values| values.open_window.take())
    }

    /// Returns the cached native client location.
    #[must_use]
    pub fn client_path(&self) -> Option<Utf8PathBuf> {
        self.read(|values| values.client_path.clone())
    }

    /// Caches the native client location.
    pub fn set_client_path(&self, path: &Utf8Path) {
        self.update(|values| values.client_path = Some(path.to_owned()));
    }
}
