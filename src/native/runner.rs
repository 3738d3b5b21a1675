//! One complete native client run: locate, prepare, execute, collect.

use super::{ClientArgument, ClientLocator, NativeClient, NativeClientError, TempWorkspace};
use crate::config::AddonConfig;
use crate::dispatch::{
    domain::Notification,
    ports::{HostApiError, Notifier},
    services::SessionState,
};
use camino::Utf8PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Label used when no client location could be determined.
const UNKNOWN_CLIENT: &str = "regify client";

/// The `.rgf` file left behind by a client run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFile {
    /// File name inside the workspace.
    pub name: String,
    /// File content.
    pub bytes: Vec<u8>,
}

/// Errors raised by [`NativeRunner::run`].
#[derive(Debug, Error)]
pub enum NativeError {
    /// The workspace could not be prepared or read.
    #[error("workspace failure: {0}")]
    Workspace(#[from] std::io::Error),
    /// The client could not be run.
    #[error(transparent)]
    Client(#[from] NativeClientError),
    /// A notification could not be shown.
    #[error(transparent)]
    Notify(#[from] HostApiError),
}

/// Runs the native client in a fresh workspace and collects its result.
#[derive(Clone)]
pub struct NativeRunner {
    client: Arc<dyn NativeClient>,
    locator: ClientLocator,
    notifier: Arc<dyn Notifier>,
    temp_root: Utf8PathBuf,
}

impl NativeRunner {
    /// Creates a runner creating workspaces under `temp_root`.
    #[must_use]
    pub fn new(
        client: Arc<dyn NativeClient>,
        locator: ClientLocator,
        notifier: Arc<dyn Notifier>,
        temp_root: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            client,
            locator,
            notifier,
            temp_root: temp_root.into(),
        }
    }

    /// Creates a runner searching the configured client locations and
    /// creating workspaces under the configured temporary root.
    #[must_use]
    pub fn from_config(
        client: Arc<dyn NativeClient>,
        session: Arc<SessionState>,
        notifier: Arc<dyn Notifier>,
        config: &AddonConfig,
    ) -> Self {
        let locator = ClientLocator::from_config(config, session);
        Self::new(client, locator, notifier, config.temp_root())
    }

    /// Runs the client with `arguments`.
    ///
    /// Returns the first `.rgf` file the client produced, or `None` when
    /// no client is installed, the client did not run, or it produced no
    /// result. The workspace is deleted afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`NativeError`] on workspace, process, or notification
    /// failures.
    pub async fn run(&self, arguments: &[ClientArgument]) -> Result<Option<ResultFile>, NativeError> {
        let Some(executable) = self.locator.locate() else {
            warn!("no native client installed");
            self.notifier
                .notify(&Notification::error(format!(
                    "Executable [{UNKNOWN_CLIENT}] not found!"
                )))
                .await?;
            return Ok(None);
        };

        let workspace = TempWorkspace::create(&self.temp_root)?;
        let workspace_arg = workspace.argument_path();
        let rendered: Vec<String> = arguments
            .iter()
            .map(|argument| argument.render(&workspace_arg))
            .collect();

        let outcome = match self.client.execute(&executable, &rendered).await {
            Ok(true) => collect(&workspace),
            Ok(false) => Ok(None),
            Err(err) => Err(err.into()),
        };
        let location = workspace.path().to_owned();
        if let Err(err) = workspace.remove() {
            warn!(path = %location, error = %err, "workspace cleanup failed");
        }
        outcome
    }
}

fn collect(workspace: &TempWorkspace) -> Result<Option<ResultFile>, NativeError> {
    let Some(name) = workspace.find_result()? else {
        info!(workspace = workspace.name(), "native client produced no result");
        return Ok(None);
    };
    let bytes = workspace.read(&name)?;
    info!(workspace = workspace.name(), file = %name, size = bytes.len(), "result collected");
    Ok(Some(ResultFile { name, bytes }))
}
