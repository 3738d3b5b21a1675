//! Accessors for the two host mail object models.
//!
//! The message view addresses data by message id and MIME part name; the
//! compose host addresses data by tab id and attachment id.

use crate::dispatch::domain::{
    AttachmentId, ComposeAttachment, ComposeDetails, ComposeDetailsPatch, ComposeTabId,
    MessageAttachment, MessageHeader, MessageId, NewAttachment, NewComposeSession,
};
use async_trait::async_trait;

use super::HostApiResult;

/// Read access to messages shown in the message view.
#[async_trait]
pub trait MessageAccessor: Send + Sync {
    /// Returns the header data of a message.
    ///
    /// # Errors
    ///
    /// Returns [`super::HostApiError::NotFound`] for unknown messages.
    async fn get(&self, message: MessageId) -> HostApiResult<MessageHeader>;

    /// Lists the attachments of a message in display order.
    async fn list_attachments(&self, message: MessageId) -> HostApiResult<Vec<MessageAttachment>>;

    /// Reads an attachment by MIME part name.
    ///
    /// Returns `None` when the part exists in the listing but its content
    /// is unavailable.
    async fn get_attachment_file(
        &self,
        message: MessageId,
        part_name: &str,
    ) -> HostApiResult<Option<Vec<u8>>>;
}

/// Read/write access to compose sessions.
#[async_trait]
pub trait ComposeAccessor: Send + Sync {
    /// Returns the current state of a compose session.
    async fn get_compose_details(&self, tab: ComposeTabId) -> HostApiResult<ComposeDetails>;

    /// Applies a partial update to a compose session.
    async fn set_compose_details(
        &self,
        tab: ComposeTabId,
        patch: &ComposeDetailsPatch,
    ) -> HostApiResult<()>;

    /// Lists the attachments of a compose session in display order.
    async fn list_attachments(&self, tab: ComposeTabId) -> HostApiResult<Vec<ComposeAttachment>>;

    /// Adds an attachment and returns its host record.
    async fn add_attachment(
        &self,
        tab: ComposeTabId,
        attachment: &NewAttachment,
    ) -> HostApiResult<ComposeAttachment>;

    /// Removes an attachment.
    async fn remove_attachment(&self, tab: ComposeTabId, attachment: AttachmentId)
    -> HostApiResult<()>;

    /// Reads an attachment's content. Returns `None` when unavailable.
    async fn get_attachment_file(
        &self,
        tab: ComposeTabId,
        attachment: AttachmentId,
    ) -> HostApiResult<Option<Vec<u8>>>;

    /// Opens a new compose session and returns its tab.
    async fn begin_new(&self, session: &NewComposeSession) -> HostApiResult<ComposeTabId>;
}
