//! In-memory compose sessions.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use super::lock_poisoned;
use crate::dispatch::{
    domain::{
        AttachmentId, ComposeAttachment, ComposeDetails, ComposeDetailsPatch, ComposeTabId,
        NewAttachment, NewComposeSession,
    },
    ports::{ComposeAccessor, HostApiError, HostApiResult},
};

/// Thread-safe in-memory compose host.
///
/// Removal of selected attachments can be made to fail so that partial
/// clearing can be exercised.
#[derive(Debug, Clone, Default)]
pub struct InMemoryComposeHost {
    state: Arc<RwLock<ComposeState>>,
}

#[derive(Debug, Default)]
struct ComposeState {
    tabs: HashMap<ComposeTabId, StoredSession>,
    next_tab: u64,
    next_attachment: u64,
    failing_removals: HashSet<AttachmentId>,
    removal_log: Vec<AttachmentId>,
}

#[derive(Debug, Default)]
struct StoredSession {
    details: ComposeDetails,
    attachments: Vec<(ComposeAttachment, Vec<u8>)>,
    content_types: HashMap<AttachmentId, String>,
}

impl ComposeState {
    fn allocate_tab(&mut self) -> ComposeTabId {
        self.next_tab += 1;
        ComposeTabId::new(self.next_tab)
    }

    fn session_mut(&mut self, tab: ComposeTabId) -> HostApiResult<&mut StoredSession> {
        self.tabs
            .get_mut(&tab)
            .ok_or(HostApiError::not_found("compose tab", tab.value()))
    }

    fn session(&self, tab: ComposeTabId) -> HostApiResult<&StoredSession> {
        self.tabs
            .get(&tab)
            .ok_or(HostApiError::not_found("compose tab", tab.value()))
    }

    fn attach(&mut self, tab: ComposeTabId, attachment: &NewAttachment) -> HostApiResult<ComposeAttachment> {
        self.next_attachment += 1;
        let record = ComposeAttachment {
            id: AttachmentId::new(self.next_attachment),
            name: attachment.name.clone(),
            size: u64::try_from(attachment.bytes.len()).unwrap_or(u64::MAX),
        };
        let session = self.session_mut(tab)?;
        session
            .content_types
            .insert(record.id, attachment.content_type.clone());
        session
            .attachments
            .push((record.clone(), attachment.bytes.clone()));
        Ok(record)
    }
}

impl InMemoryComposeHost {
    /// Creates a host with no sessions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session with the given state and returns its tab.
    #[must_use]
    pub fn open_session(&self, details: ComposeDetails) -> ComposeTabId {
        let Ok(mut state) = self.state.write() else {
            return ComposeTabId::new(0);
        };
        let tab = state.allocate_tab();
        state.tabs.insert(
            tab,
            StoredSession {
                details,
                ..StoredSession::default()
            },
        );
        tab
    }

    /// Adds an attachment to an open session.
    ///
    /// # Errors
    ///
    /// Returns [`HostApiError::NotFound`] for unknown tabs.
    pub fn seed_attachment(
        &self,
        tab: ComposeTabId,
        attachment: &NewAttachment,
    ) -> HostApiResult<ComposeAttachment> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.attach(tab, attachment)
    }

    /// Makes removal of `attachment` fail.
    pub fn fail_removal_of(&self, attachment: AttachmentId) {
        if let Ok(mut state) = self.state.write() {
            state.failing_removals.insert(attachment);
        }
    }

    /// Returns the current state of a session.
    #[must_use]
    pub fn details(&self, tab: ComposeTabId) -> Option<ComposeDetails> {
        let state = self.state.read().ok()?;
        state.tabs.get(&tab).map(|session| session.details.clone())
    }

    /// Returns attachment names, content types, and contents of a session.
    #[must_use]
    pub fn attachment_contents(&self, tab: ComposeTabId) -> Vec<(String, String, Vec<u8>)> {
        let Ok(state) = self.state.read() else {
            return Vec::new();
        };
        state
            .tabs
            .get(&tab)
            .map(|session| {
                session
                    .attachments
                    .iter()
                    .map(|(record, bytes)| {
                        let content_type = session
                            .content_types
                            .get(&record.id)
                            .cloned()
                            .unwrap_or_default();
                        (record.name.clone(), content_type, bytes.clone())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns attachment ids in the order removals were attempted.
    #[must_use]
    pub fn removal_log(&self) -> Vec<AttachmentId> {
        self.state
            .read()
            .map(|state| state.removal_log.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ComposeAccessor for InMemoryComposeHost {
    async fn get_compose_details(&self, tab: ComposeTabId) -> HostApiResult<ComposeDetails> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.session(tab)?.details.clone())
    }

    async fn set_compose_details(
        &self,
        tab: ComposeTabId,
        patch: &ComposeDetailsPatch,
    ) -> HostApiResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let details = &mut state.session_mut(tab)?.details;
        if let Some(body) = &patch.body {
            details.body.clone_from(body);
        }
        if let Some(plain) = &patch.plain_text_body {
            details.plain_text_body.clone_from(plain);
        }
        Ok(())
    }

    async fn list_attachments(&self, tab: ComposeTabId) -> HostApiResult<Vec<ComposeAttachment>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .session(tab)?
            .attachments
            .iter()
            .map(|(record, _)| record.clone())
            .collect())
    }

    async fn add_attachment(
        &self,
        tab: ComposeTabId,
        attachment: &NewAttachment,
    ) -> HostApiResult<ComposeAttachment> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.attach(tab, attachment)
    }

    async fn remove_attachment(
        &self,
        tab: ComposeTabId,
        attachment: AttachmentId,
    ) -> HostApiResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.removal_log.push(attachment);
        if state.failing_removals.contains(&attachment) {
            return Err(HostApiError::runtime(std::io::Error::other(format!(
                "attachment {attachment} is locked"
            ))));
        }
        let session = state.session_mut(tab)?;
        let before = session.attachments.len();
        session
            .attachments
            .retain(|(record, _)| record.id != attachment);
        if session.attachments.len() == before {
            return Err(HostApiError::not_found("attachment", attachment.value()));
        }
        session.content_types.remove(&attachment);
        Ok(())
    }

    async fn get_attachment_file(
        &self,
        tab: ComposeTabId,
        attachment: AttachmentId,
    ) -> HostApiResult<Option<Vec<u8>>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .session(tab)?
            .attachments
            .iter()
            .find(|(record, _)| record.id == attachment)
            .map(|(_, bytes)| bytes.clone()))
    }

    async fn begin_new(&self, session: &NewComposeSession) -> HostApiResult<ComposeTabId> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let tab = state.allocate_tab();
        let details = ComposeDetails {
            subject: session.subject.clone(),
            to: session.to.clone(),
            body: session.body.clone(),
            ..ComposeDetails::default()
        };
        state.tabs.insert(
            tab,
            StoredSession {
                details,
                ..StoredSession::default()
            },
        );
        Ok(tab)
    }
}
