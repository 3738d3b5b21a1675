//! Resolution of a context mode to its backing accessor and active entity.
//!
//! The two host object models disagree on almost everything: the message
//! view keys attachments by MIME part name and exposes `recipients` plus
//! `ccList`, while compose sessions key attachments by id and expose `to`
//! plus `cc`. [`ResolvedContext`] hides those differences behind one set of
//! reads.

use super::{DispatchError, DispatchResult, SessionState};
use crate::dispatch::{
    domain::{
        AttachmentId, AttachmentLocator, AttachmentRef, ComposeAttachment, ComposeDetails,
        ComposeDetailsPatch, ComposeTabId, ContextMode, MessageId, NewAttachment,
    },
    ports::{ComposeAccessor, HostApiResult, MessageAccessor},
};
use std::sync::Arc;
use tracing::error;

/// The message view bound to the selected message.
#[derive(Clone)]
pub struct ReadContext {
    accessor: Arc<dyn MessageAccessor>,
    message: MessageId,
}

impl ReadContext {
    /// Returns the selected message.
    #[must_use]
    pub const fn message(&self) -> MessageId {
        self.message
    }
}

/// The compose host bound to the active compose tab.
#[derive(Clone)]
pub struct ComposeContext {
    accessor: Arc<dyn ComposeAccessor>,
    tab: ComposeTabId,
}

impl ComposeContext {
    /// Returns the active compose tab.
    #[must_use]
    pub const fn tab(&self) -> ComposeTabId {
        self.tab
    }

    /// Reads the session state.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub async fn details(&self) -> HostApiResult<ComposeDetails> {
        self.accessor.get_compose_details(self.tab).await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub async fn set_details(&self, patch: &ComposeDetailsPatch) -> HostApiResult<()> {
        self.accessor.set_compose_details(self.tab, patch).await
    }

    /// Lists attachments in display order.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub async fn attachments(&self) -> HostApiResult<Vec<ComposeAttachment>> {
        self.accessor.list_attachments(self.tab).await
    }

    /// Adds an attachment.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub async fn add_attachment(&self, attachment: &NewAttachment) -> HostApiResult<ComposeAttachment> {
        self.accessor.add_attachment(self.tab, attachment).await
    }

    /// Removes an attachment.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub async fn remove_attachment(&self, attachment: AttachmentId) -> HostApiResult<()> {
        self.accessor.remove_attachment(self.tab, attachment).await
    }
}

/// A mode resolved to its accessor and active entity.
#[derive(Clone)]
pub enum ResolvedContext {
    /// Message view.
    Read(ReadContext),
    /// Compose session.
    Compose(ComposeContext),
}

impl ResolvedContext {
    /// Returns the mode this context serves.
    #[must_use]
    pub const fn mode(&self) -> ContextMode {
        match self {
            Self::Read(_) => ContextMode::Read,
            Self::Compose(_) => ContextMode::Compose,
        }
    }

    /// Returns the compose variant, if any.
    #[must_use]
    pub const fn as_compose(&self) -> Option<&ComposeContext> {
        match self {
            Self::Compose(compose) => Some(compose),
            Self::Read(_) => None,
        }
    }

    /// Lists attachments in display order.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub async fn attachments(&self) -> HostApiResult<Vec<AttachmentRef>> {
        Ok(match self {
            Self::Read(read) => read
                .accessor
                .list_attachments(read.message)
                .await?
                .into_iter()
                .map(AttachmentRef::from)
                .collect(),
            Self::Compose(compose) => compose
                .attachments()
                .await?
                .into_iter()
                .map(AttachmentRef::from)
                .collect(),
        })
    }

    /// Fetches attachment content. Returns `None` when the content is
    /// unavailable or the locator belongs to the other object model.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub async fn attachment_bytes(
        &self,
        locator: &AttachmentLocator,
    ) -> HostApiResult<Option<Vec<u8>>> {
        match (self, locator) {
            (Self::Read(read), AttachmentLocator::PartName(part)) => {
                read.accessor.get_attachment_file(read.message, part).await
            }
            (Self::Compose(compose), AttachmentLocator::Id(id)) => {
                compose.accessor.get_attachment_file(compose.tab, *id).await
            }
            _ => Ok(None),
        }
    }

    /// Returns the subject.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub async fn subject(&self) -> HostApiResult<String> {
        Ok(match self {
            Self::Read(read) => read.accessor.get(read.message).await?.subject,
            Self::Compose(compose) => compose.details().await?.subject,
        })
    }

    /// Returns primary and carbon-copy recipients as the host reports them.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub async fn recipients(&self) -> HostApiResult<Vec<String>> {
        Ok(match self {
            Self::Read(read) => read.accessor.get(read.message).await?.all_recipients(),
            Self::Compose(compose) => compose.details().await?.all_recipients(),
        })
    }

    /// Returns the sender as the host reports it.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub async fn sender(&self) -> HostApiResult<String> {
        Ok(match self {
            Self::Read(read) => read.accessor.get(read.message).await?.author,
            Self::Compose(compose) => compose.details().await?.from,
        })
    }
}

/// Maps a context mode to an accessor plus the active entity id.
#[derive(Clone)]
pub struct ContextResolver {
    messages: Arc<dyn MessageAccessor>,
    compose: Arc<dyn ComposeAccessor>,
    session: Arc<SessionState>,
}

impl ContextResolver {
    /// Creates a resolver reading active ids from `session`.
    #[must_use]
    pub fn new(
        messages: Arc<dyn MessageAccessor>,
        compose: Arc<dyn ComposeAccessor>,
        session: Arc<SessionState>,
    ) -> Self {
        Self {
            messages,
            compose,
            session,
        }
    }

    /// Resolves `mode` against the current session values.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NoActiveContext`] when no message is
    /// selected (read) or no compose tab is recorded (compose).
    pub fn resolve(&self, mode: ContextMode) -> DispatchResult<ResolvedContext> {
        let snapshot = self.session.snapshot();
        let resolved = match mode {
            ContextMode::Read => snapshot.selected_message.map(|message| {
                ResolvedContext::Read(ReadContext {
                    accessor: Arc::clone(&self.messages),
                    message,
                })
            }),
            ContextMode::Compose => snapshot.compose_tab.map(|tab| {
                ResolvedContext::Compose(ComposeContext {
                    accessor: Arc::clone(&self.compose),
                    tab,
                })
            }),
        };
        resolved.ok_or_else(|| {
            error!(%mode, "no active context");
            DispatchError::NoActiveContext { mode }
        })
    }
}
