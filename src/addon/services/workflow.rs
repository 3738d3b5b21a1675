//! Toolbar actions and message selection tracking.

use super::{AddonResult, ServerLocator};
use crate::addon::{
    domain::{FrameSource, Notice, WindowKind, is_regimail_name},
    ports::ReachabilityProbe,
};
use crate::config::AddonConfig;
use crate::dispatch::{
    domain::{ComposeTabId, MessageAttachment, MessageId, Notification, WindowId},
    services::{HelperWindow, HostServices, SessionState},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Drives the send and read flows of the add-on.
#[derive(Clone)]
pub struct AddonWorkflow {
    host: HostServices,
    session: Arc<SessionState>,
    window: HelperWindow,
    locator: ServerLocator,
}

impl AddonWorkflow {
    /// Creates a workflow with default window size and server set.
    #[must_use]
    pub fn new(
        host: HostServices,
        session: Arc<SessionState>,
        probe: Arc<dyn ReachabilityProbe>,
    ) -> Self {
        let window = HelperWindow::new(
            Arc::clone(&host.windows),
            Arc::clone(&host.settings),
            Arc::clone(&session),
        );
        let locator = ServerLocator::new(
            probe,
            Arc::clone(&host.settings),
            Arc::clone(&host.notifier),
        );
        Self {
            host,
            session,
            window,
            locator,
        }
    }

    /// Creates a workflow sized and pointed at servers from `config`.
    #[must_use]
    pub fn from_config(
        host: HostServices,
        session: Arc<SessionState>,
        probe: Arc<dyn ReachabilityProbe>,
        config: &AddonConfig,
    ) -> Self {
        let mut workflow = Self::new(host, session, probe);
        workflow.window = workflow
            .window
            .with_default_size(config.default_window_width, config.default_window_height);
        workflow.locator = workflow
            .locator
            .with_servers(config.server_domain.clone(), config.server_count);
        workflow
    }

    /// Returns the helper-window manager.
    #[must_use]
    pub const fn helper_window(&self) -> &HelperWindow {
        &self.window
    }

    /// Returns the server locator.
    #[must_use]
    pub const fn locator(&self) -> &ServerLocator {
        &self.locator
    }

    async fn refuse(&self, notice: Notice) -> AddonResult<bool> {
        info!(notice = notice.key(), "action refused");
        let notification = if notice.is_error() {
            Notification::error(notice.text())
        } else {
            Notification::info(notice.text())
        };
        self.host.notifier.notify(&notification).await?;
        Ok(false)
    }

    /// Starts the send flow for the compose session in `tab`.
    ///
    /// Refuses, with a notification, sessions that have BCC recipients, an
    /// empty subject, or no primary and carbon-copy recipients (checked in
    /// that order). Returns `true` when the send window was opened.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub async fn create_regimail(&self, tab: ComposeTabId) -> AddonResult<bool> {
        self.session.set_compose_tab(Some(tab));
        let details = self.host.compose.get_compose_details(tab).await?;

        if !details.bcc.is_empty() {
            return self.refuse(Notice::NoBcc).await;
        }
        if details.subject.is_empty() {
            return self.refuse(Notice::NoEmptySubject).await;
        }
        if details.all_recipients().is_empty() {
            return self.refuse(Notice::OneRecipient).await;
        }

        self.window.show(WindowKind::Send.page()).await?;
        Ok(true)
    }

    /// Opens the read window for the selected message.
    ///
    /// Does nothing when no message is selected. Returns `true` when the
    /// read window was opened.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub async fn read_regimail(&self) -> AddonResult<bool> {
        let Some(message) = self.session.selected_message() else {
            debug!("no message selected");
            return Ok(false);
        };
        if self.find_regimail_attachment(message).await?.is_none() {
            return self.refuse(Notice::NoRegimail).await;
        }
        self.window.show(WindowKind::Read.page()).await?;
        Ok(true)
    }

    /// Tracks the first selected message of the message view.
    ///
    /// The message is remembered only when it carries a regimail
    /// attachment; lookup failures clear the selection. Returns whether
    /// the read action should be enabled.
    pub async fn selection_changed(&self, first_selected: Option<MessageId>) -> bool {
        let carrier = match first_selected {
            Some(message) => match self.find_regimail_attachment(message).await {
                Ok(found) => found.map(|_| message),
                Err(err) => {
                    warn!(%message, error = %err, "selection lookup failed");
                    None
                }
            },
            None => None,
        };
        self.session.set_selected_message(carrier);
        debug!(selected = ?carrier, "selection changed");
        carrier.is_some()
    }

    /// Returns the first `.rgf` or `.rgp` attachment of `message`.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub async fn find_regimail_attachment(
        &self,
        message: MessageId,
    ) -> AddonResult<Option<MessageAttachment>> {
        let attachments = self.host.messages.list_attachments(message).await?;
        Ok(attachments
            .into_iter()
            .find(|attachment| is_regimail_name(&attachment.name)))
    }

    /// Resolves what the helper window frame shows for `kind`.
    ///
    /// # Errors
    ///
    /// Propagates settings failures and page rendering errors.
    pub async fn frame_source(&self, kind: WindowKind) -> AddonResult<FrameSource> {
        self.locator.frame_source(kind).await
    }

    /// Persists the open helper window's geometry.
    ///
    /// # Errors
    ///
    /// Propagates settings and window host failures.
    pub async fn remember_geometry(&self) -> AddonResult<bool> {
        Ok(self.window.remember_geometry().await?)
    }

    /// Closes the helper window.
    ///
    /// # Errors
    ///
    /// Propagates window host failures.
    pub async fn close_window(&self) -> AddonResult<Option<WindowId>> {
        let open = self.session.open_window();
        Ok(if self.window.close().await? { open } else { None })
    }
}
