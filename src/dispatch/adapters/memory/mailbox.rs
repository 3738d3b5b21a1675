//! In-memory message view.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::lock_poisoned;
use crate::dispatch::{
    domain::{MessageAttachment, MessageHeader, MessageId},
    ports::{HostApiError, HostApiResult, MessageAccessor},
};

/// Thread-safe in-memory message store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMailbox {
    state: Arc<RwLock<HashMap<MessageId, StoredMessage>>>,
}

#[derive(Debug, Default)]
struct StoredMessage {
    header: MessageHeader,
    attachments: Vec<(MessageAttachment, Option<Vec<u8>>)>,
}

impl InMemoryMailbox {
    /// Creates an empty mailbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a message, replacing any message with the same id.
    pub fn insert_message(&self, message: MessageId, header: MessageHeader) {
        if let Ok(mut state) = self.state.write() {
            state.insert(
                message,
                StoredMessage {
                    header,
                    attachments: Vec::new(),
                },
            );
        }
    }

    /// Appends an attachment to a stored message.
    ///
    /// Part names are assigned as `1.2`, `1.3`, ... in insertion order.
    /// `None` content models a part the host cannot read.
    pub fn add_attachment(&self, message: MessageId, name: &str, content: Option<Vec<u8>>) {
        let Ok(mut state) = self.state.write() else {
            return;
        };
        let stored = state.entry(message).or_default();
        let part_name = format!("1.{}", stored.attachments.len() + 2);
        let size = content.as_ref().map_or(0, Vec::len);
        let attachment = MessageAttachment {
            name: name.to_owned(),
            part_name,
            content_type: "application/octet-stream".to_owned(),
            size: u64::try_from(size).unwrap_or(u64::MAX),
        };
        stored.attachments.push((attachment, content));
    }
}

#[async_trait]
impl MessageAccessor for InMemoryMailbox {
    async fn get(&self, message: MessageId) -> HostApiResult<MessageHeader> {
        let state = self.state.read().map_err(lock_poisoned)?;
        state
            .get(&message)
            .map(|stored| stored.header.clone())
            .ok_or(HostApiError::not_found("message", message.value()))
    }

    async fn list_attachments(&self, message: MessageId) -> HostApiResult<Vec<MessageAttachment>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let stored = state
            .get(&message)
            .ok_or(HostApiError::not_found("message", message.value()))?;
        Ok(stored
            .attachments
            .iter()
            .map(|(attachment, _)| attachment.clone())
            .collect())
    }

    async fn get_attachment_file(
        &self,
        message: MessageId,
        part_name: &str,
    ) -> HostApiResult<Option<Vec<u8>>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let stored = state
            .get(&message)
            .ok_or(HostApiError::not_found("message", message.value()))?;
        Ok(stored
            .attachments
            .iter()
            .find(|(attachment, _)| attachment.part_name == part_name)
            .and_then(|(_, content)| content.clone()))
    }
}
