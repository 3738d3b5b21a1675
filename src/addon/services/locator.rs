//! Location of a reachable regify application server.

use super::AddonResult;
use crate::addon::{
    domain::{DeveloperServer, FrameSource, WindowKind},
    pages::unreachable_server_page,
    ports::ReachabilityProbe,
};
use crate::dispatch::{
    domain::Notification,
    ports::{Notifier, SettingsStore},
    services::setting_text,
};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Domain hosting the regify application servers.
pub const DEFAULT_SERVER_DOMAIN: &str = "regify.com";

/// Number of numbered fallback servers (`apps1` onwards).
pub const DEFAULT_SERVER_COUNT: u8 = 3;

const CHECK_PAGE: &str = "check.html";

/// Finds the first answering regify server.
///
/// A `developer` setting of the form `subdomain:port` is tried first.
/// Otherwise, or when that server does not answer, the numbered servers are
/// probed in order, using the beta client path when `beta` is `"true"`.
#[derive(Clone)]
pub struct ServerLocator {
    probe: Arc<dyn ReachabilityProbe>,
    settings: Arc<dyn SettingsStore>,
    notifier: Arc<dyn Notifier>,
    domain: String,
    server_count: u8,
}

impl ServerLocator {
    /// Creates a locator probing servers under [`DEFAULT_SERVER_DOMAIN`].
    #[must_use]
    pub fn new(
        probe: Arc<dyn ReachabilityProbe>,
        settings: Arc<dyn SettingsStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            probe,
            settings,
            notifier,
            domain: DEFAULT_SERVER_DOMAIN.to_owned(),
            server_count: DEFAULT_SERVER_COUNT,
        }
    }

    /// Overrides the server domain and number of fallback servers.
    #[must_use]
    pub fn with_servers(mut self, domain: impl Into<String>, server_count: u8) -> Self {
        self.domain = domain.into();
        self.server_count = server_count;
        self
    }

    async fn notify_error(&self, message: String) -> AddonResult<()> {
        self.notifier.notify(&Notification::error(message)).await?;
        Ok(())
    }

    async fn developer_base(&self, setting: &str) -> AddonResult<Option<String>> {
        match DeveloperServer::parse(setting) {
            Ok(server) => {
                let base = server.base_url(&self.domain);
                let check = format!("{base}{CHECK_PAGE}");
                if self.probe.is_reachable(&check).await {
                    return Ok(Some(base));
                }
                warn!(url = %check, "developer server unreachable");
                self.notify_error(format!(
                    "Unable to connect to {check}. Therefore I continue without developer domain."
                ))
                .await?;
            }
            Err(err) => {
                warn!(setting, error = %err, "invalid developer server setting");
                self.notify_error(err.to_string()).await?;
            }
        }
        Ok(None)
    }

    /// Returns the base URL (with trailing slash) of the first reachable
    /// server, or `None` when none answers.
    ///
    /// # Errors
    ///
    /// Propagates settings and notification failures.
    pub async fn locate(&self) -> AddonResult<Option<String>> {
        let developer = setting_text(self.settings.as_ref(), "developer").await?;
        if !developer.is_empty()
            && let Some(base) = self.developer_base(&developer).await?
        {
            debug!(%base, "using developer server");
            return Ok(Some(base));
        }

        let beta = setting_text(self.settings.as_ref(), "beta").await?;
        let client_path = if beta == "true" { "client-beta" } else { "client" };
        for index in 1..=self.server_count {
            let base = format!("https://apps{index}.{}/{client_path}/", self.domain);
            if self.probe.is_reachable(&format!("{base}{CHECK_PAGE}")).await {
                debug!(%base, "regify server located");
                return Ok(Some(base));
            }
        }
        error!(domain = %self.domain, "no accessible regify server found");
        Ok(None)
    }

    /// Resolves what the helper window frame shows for `kind`.
    ///
    /// # Errors
    ///
    /// Propagates lookup failures and page rendering errors.
    pub async fn frame_source(&self, kind: WindowKind) -> AddonResult<FrameSource> {
        Ok(match self.locate().await? {
            Some(base) => FrameSource::Url(format!("{base}{}", kind.app_page())),
            None => FrameSource::Document(unreachable_server_page()?),
        })
    }
}
