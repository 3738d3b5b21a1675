//! Message and compose-session data as reported by the host.
//!
//! Field names follow the host's JSON shapes (`ccList`, `plainTextBody`,
//! `isPlainText`, `partName`).

use super::AttachmentId;
use serde::{Deserialize, Serialize};

/// MIME type attached to generated regimail files.
pub const REGIFY_CONTENT_TYPE: &str = "application/vnd.regify";

/// Header data of a message in the message view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageHeader {
    /// Subject line.
    pub subject: String,
    /// Primary recipients.
    pub recipients: Vec<String>,
    /// Carbon-copy recipients.
    pub cc_list: Vec<String>,
    /// Author, possibly with display name.
    pub author: String,
}

impl MessageHeader {
    /// Returns primary and carbon-copy recipients together.
    #[must_use]
    pub fn all_recipients(&self) -> Vec<String> {
        self.recipients
            .iter()
            .chain(&self.cc_list)
            .cloned()
            .collect()
    }
}

/// Attachment of a message in the message view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAttachment {
    /// File name.
    pub name: String,
    /// MIME part name used to fetch the content.
    pub part_name: String,
    /// Declared content type.
    pub content_type: String,
    /// Size in bytes.
    pub size: u64,
}

/// State of a compose session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeDetails {
    /// Subject line.
    pub subject: String,
    /// Primary recipients.
    pub to: Vec<String>,
    /// Carbon-copy recipients.
    pub cc: Vec<String>,
    /// Blind carbon-copy recipients.
    pub bcc: Vec<String>,
    /// Sender identity, possibly with display name.
    pub from: String,
    /// HTML body.
    pub body: String,
    /// Plain-text body.
    pub plain_text_body: String,
    /// Whether the session is composing plain text.
    pub is_plain_text: bool,
}

impl ComposeDetails {
    /// Returns primary and carbon-copy recipients together.
    #[must_use]
    pub fn all_recipients(&self) -> Vec<String> {
        self.to.iter().chain(&self.cc).cloned().collect()
    }
}

/// Partial update of a compose session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeDetailsPatch {
    /// Replacement HTML body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Replacement plain-text body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_text_body: Option<String>,
}

impl ComposeDetailsPatch {
    /// Patch replacing the HTML body.
    #[must_use]
    pub fn html_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            plain_text_body: None,
        }
    }

    /// Patch replacing the plain-text body.
    #[must_use]
    pub fn plain_text_body(body: impl Into<String>) -> Self {
        Self {
            body: None,
            plain_text_body: Some(body.into()),
        }
    }
}

/// Attachment of a compose session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeAttachment {
    /// Host attachment identifier.
    pub id: AttachmentId,
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

/// A file to attach to a compose session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttachment {
    /// File name shown to recipients.
    pub name: String,
    /// MIME type.
    pub content_type: String,
    /// File content.
    pub bytes: Vec<u8>,
}

impl NewAttachment {
    /// Creates a regimail attachment named after the file part of `path`.
    #[must_use]
    pub fn regimail(path: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: super::file_part(path).to_owned(),
            content_type: REGIFY_CONTENT_TYPE.to_owned(),
            bytes,
        }
    }
}

/// Fields of a newly opened compose session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComposeSession {
    /// Primary recipients.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub body: String,
}

/// How an attachment's content is fetched from its backing accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentLocator {
    /// Message view: by MIME part name.
    PartName(String),
    /// Compose session: by attachment identifier.
    Id(AttachmentId),
}

/// Attachment reference shared by both context variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    /// File name.
    pub name: String,
    /// Content locator.
    pub locator: AttachmentLocator,
}

impl From<MessageAttachment> for AttachmentRef {
    fn from(attachment: MessageAttachment) -> Self {
        Self {
            name: attachment.name,
            locator: AttachmentLocator::PartName(attachment.part_name),
        }
    }
}

impl From<ComposeAttachment> for AttachmentRef {
    fn from(attachment: ComposeAttachment) -> Self {
        Self {
            name: attachment.name,
            locator: AttachmentLocator::Id(attachment.id),
        }
    }
}
