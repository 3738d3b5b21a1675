//! Process execution of the native client.

use super::locator::file_exists;
use crate::dispatch::{
    domain::Notification,
    ports::{HostApiError, Notifier},
};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::process::Command;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while running the native client.
#[derive(Debug, Clone, Error)]
pub enum NativeClientError {
    /// The executable exists but could not be started.
    #[error("failed to start {path}: {source}")]
    Spawn {
        /// Executable that failed to start.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: Arc<std::io::Error>,
    },
    /// The blocking execution task failed.
    #[error("native client runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
    /// Reporting a missing executable failed.
    #[error(transparent)]
    Notify(#[from] HostApiError),
}

impl NativeClientError {
    /// Wraps a runtime failure.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}

/// Runs an executable to completion.
#[async_trait]
pub trait NativeClient: Send + Sync {
    /// Runs `executable` with `args` and waits for it to exit.
    ///
    /// Returns `false` without running anything when the executable does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns [`NativeClientError`] when the process cannot be started.
    async fn execute(
        &self,
        executable: &Utf8Path,
        args: &[String],
    ) -> Result<bool, NativeClientError>;
}

/// Starts the client as an operating-system process.
#[derive(Clone)]
pub struct ProcessClient {
    notifier: Arc<dyn Notifier>,
}

impl ProcessClient {
    /// Creates a client reporting missing executables through `notifier`.
    #[must_use]
    pub const fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl NativeClient for ProcessClient {
    async fn execute(
        &self,
        executable: &Utf8Path,
        args: &[String],
    ) -> Result<bool, NativeClientError> {
        if !file_exists(executable) {
            warn!(path = %executable, "native client missing");
            self.notifier
                .notify(&Notification::error(format!(
                    "Executable [{executable}] not found!"
                )))
                .await?;
            return Ok(false);
        }

        let path = executable.to_owned();
        let arguments = args.to_vec();
        info!(path = %path, args = arguments.len(), "starting native client");
        let status = tokio::task::spawn_blocking(move || {
            Command::new(path.as_std_path())
                .args(&arguments)
                .status()
                .map_err(|source| NativeClientError::Spawn {
                    path,
                    source: Arc::new(source),
                })
        })
        .await
        .map_err(NativeClientError::runtime)??;

        if !status.success() {
            warn!(path = %executable, code = ?status.code(), "native client exited with failure");
        }
        Ok(true)
    }
}
