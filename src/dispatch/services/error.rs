//! Service-level dispatch errors and their wire representation.

use crate::bridge::domain::ErrorPayload;
use crate::dispatch::{
    domain::{ContextMode, RequestDecodeError},
    ports::{HostApiError, SettingsStoreError},
};
use thiserror::Error;

/// Errors raised while executing an operation request.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// The requested mode has no active entity (no selected message or no
    /// compose session).
    #[error("no active {mode} context")]
    NoActiveContext {
        /// Mode that could not be resolved.
        mode: ContextMode,
    },

    /// The request payload is malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestDecodeError),

    /// Clearing compose attachments failed part-way.
    #[error("failed to remove attachment '{name}': {source}")]
    AttachmentRemoval {
        /// Name of the attachment that could not be removed.
        name: String,
        /// Host failure.
        #[source]
        source: HostApiError,
    },

    /// Settings persistence failed.
    #[error(transparent)]
    Settings(#[from] SettingsStoreError),

    /// A host API call failed.
    #[error(transparent)]
    Host(#[from] HostApiError),
}

impl DispatchError {
    /// Stable machine-readable code sent across the bridge.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoActiveContext { .. } => "no_active_context",
            Self::InvalidRequest(_) => "invalid_request",
            Self::AttachmentRemoval { .. } => "attachment_removal_failed",
            Self::Settings(_) => "settings",
            Self::Host(_) => "host",
        }
    }
}

impl From<&DispatchError> for ErrorPayload {
    fn from(err: &DispatchError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
