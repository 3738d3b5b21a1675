//! User-facing notifications.

use serde::{Deserialize, Serialize};

/// Title shown on every add-on notification.
const NOTIFICATION_TITLE: &str = "regimail";

/// A basic host notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Notification title.
    pub title: String,
    /// Message body.
    pub message: String,
    /// Whether the message reports a failure.
    pub is_error: bool,
}

impl Notification {
    /// Creates an informational notification.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            title: NOTIFICATION_TITLE.to_owned(),
            message: message.into(),
            is_error: false,
        }
    }

    /// Creates an error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::info(message)
        }
    }
}
