//! Shared world state for regimail send scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use regimail::addon::{adapters::StaticProbe, services::AddonWorkflow};
use regimail::dispatch::{
    adapters::{
        InMemoryComposeHost, InMemoryMailbox, InMemorySettingsStore, InMemoryWindowHost,
        RecordingNotifier, StaticRuntimeInfo, TagStrippingConverter,
    },
    domain::ComposeTabId,
    services::{CommandDispatcher, HostServices, SessionState},
};
use rstest::fixture;

/// Scenario world wiring the add-on workflow and dispatcher to one
/// in-memory host.
pub struct SendWorld {
    pub workflow: AddonWorkflow,
    pub dispatcher: Arc<CommandDispatcher>,
    pub compose: InMemoryComposeHost,
    pub windows: InMemoryWindowHost,
    pub notifier: RecordingNotifier<DefaultClock>,
    pub tab: Option<ComposeTabId>,
    pub last_opened: Option<bool>,
}

impl SendWorld {
    /// Creates a world with no compose session.
    #[must_use]
    pub fn new() -> Self {
        let compose = InMemoryComposeHost::new();
        let windows = InMemoryWindowHost::new();
        let notifier = RecordingNotifier::new(DefaultClock);
        let session = Arc::new(SessionState::new());
        let host = HostServices {
            settings: Arc::new(InMemorySettingsStore::new()),
            messages: Arc::new(InMemoryMailbox::new()),
            compose: Arc::new(compose.clone()),
            windows: Arc::new(windows.clone()),
            notifier: Arc::new(notifier.clone()),
            runtime: Arc::new(StaticRuntimeInfo::new("linux", "2.4.0")),
            text: Arc::new(TagStrippingConverter),
        };
        let dispatcher = Arc::new(CommandDispatcher::new(host.clone(), Arc::clone(&session)));
        let workflow = AddonWorkflow::new(host, session, Arc::new(StaticProbe::new()));
        Self {
            workflow,
            dispatcher,
            compose,
            windows,
            notifier,
            tab: None,
            last_opened: None,
        }
    }
}

impl Default for SendWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SendWorld {
    SendWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
