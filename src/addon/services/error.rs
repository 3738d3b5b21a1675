//! Add-on service errors.

use crate::dispatch::{
    ports::{HostApiError, SettingsStoreError},
    services::DispatchError,
};
use thiserror::Error;

/// Errors raised by add-on workflow operations.
#[derive(Debug, Error)]
pub enum AddonError {
    /// A dispatch-level operation failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// An inline page could not be rendered.
    #[error("failed to render page: {0}")]
    Render(#[from] minijinja::Error),
}

impl From<HostApiError> for AddonError {
    fn from(err: HostApiError) -> Self {
        Self::Dispatch(err.into())
    }
}

impl From<SettingsStoreError> for AddonError {
    fn from(err: SettingsStoreError) -> Self {
        Self::Dispatch(err.into())
    }
}

/// Result type for add-on operations.
pub type AddonResult<T> = Result<T, AddonError>;
