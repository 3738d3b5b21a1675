//! Unit tests for the dispatch module.

mod host_tests;

use std::sync::Arc;

use crate::dispatch::{
    adapters::{
        InMemoryComposeHost, InMemoryMailbox, InMemorySettingsStore, InMemoryWindowHost,
        RecordingNotifier, StaticRuntimeInfo, TagStrippingConverter,
    },
    services::{CommandDispatcher, HostServices, SessionState},
};
use mockable::DefaultClock;

/// Dispatcher wired to in-memory doubles that tests can inspect.
pub(super) struct Harness {
    pub dispatcher: CommandDispatcher,
    pub session: Arc<SessionState>,
    pub settings: InMemorySettingsStore,
    pub mailbox: InMemoryMailbox,
    pub compose: InMemoryComposeHost,
    pub windows: InMemoryWindowHost,
    pub notifier: RecordingNotifier<DefaultClock>,
}

impl Harness {
    pub fn new() -> Self {
        let session = Arc::new(SessionState::new());
        let settings = InMemorySettingsStore::new();
        let mailbox = InMemoryMailbox::new();
        let compose = InMemoryComposeHost::new();
        let windows = InMemoryWindowHost::new();
        let notifier = RecordingNotifier::new(DefaultClock);
        let host = HostServices {
            settings: Arc::new(settings.clone()),
            messages: Arc::new(mailbox.clone()),
            compose: Arc::new(compose.clone()),
            windows: Arc::new(windows.clone()),
            notifier: Arc::new(notifier.clone()),
            runtime: Arc::new(StaticRuntimeInfo::new("win", "2.4.0")),
            text: Arc::new(TagStrippingConverter),
        };
        Self {
            dispatcher: CommandDispatcher::new(host, Arc::clone(&session)),
            session,
            settings,
            mailbox,
            compose,
            windows,
            notifier,
        }
    }
}
