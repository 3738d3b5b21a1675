//! Unit tests for the add-on workflow.

mod workflow_tests;

use std::sync::Arc;

use serde_json::Value;

use crate::addon::{adapters::StaticProbe, services::AddonWorkflow};
use crate::dispatch::{
    adapters::{
        InMemoryComposeHost, InMemoryMailbox, InMemorySettingsStore, InMemoryWindowHost,
        RecordingNotifier, StaticRuntimeInfo, TagStrippingConverter,
    },
    services::{HostServices, SessionState},
};
use mockable::DefaultClock;

/// In-memory host shared by the add-on tests.
pub(super) struct Host {
    pub services: HostServices,
    pub session: Arc<SessionState>,
    pub mailbox: InMemoryMailbox,
    pub compose: InMemoryComposeHost,
    pub windows: InMemoryWindowHost,
    pub notifier: RecordingNotifier<DefaultClock>,
}

impl Host {
    pub fn with_settings<K: Into<String>>(values: impl IntoIterator<Item = (K, Value)>) -> Self {
        let settings = InMemorySettingsStore::with_values(values);
        let mailbox = InMemoryMailbox::new();
        let compose = InMemoryComposeHost::new();
        let windows = InMemoryWindowHost::new();
        let notifier = RecordingNotifier::new(DefaultClock);
        let services = HostServices {
            settings: Arc::new(settings),
            messages: Arc::new(mailbox.clone()),
            compose: Arc::new(compose.clone()),
            windows: Arc::new(windows.clone()),
            notifier: Arc::new(notifier.clone()),
            runtime: Arc::new(StaticRuntimeInfo::new("linux", "2.4.0")),
            text: Arc::new(TagStrippingConverter),
        };
        Self {
            services,
            session: Arc::new(SessionState::new()),
            mailbox,
            compose,
            windows,
            notifier,
        }
    }

    pub fn new() -> Self {
        Self::with_settings(Vec::<(String, Value)>::new())
    }

    pub fn workflow(&self, probe: &StaticProbe) -> AddonWorkflow {
        AddonWorkflow::new(
            self.services.clone(),
            Arc::clone(&self.session),
            Arc::new(probe.clone()),
        )
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifier
            .shown()
            .into_iter()
            .map(|notification| notification.message)
            .collect()
    }
}
