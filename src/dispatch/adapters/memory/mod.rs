//! In-memory host doubles for tests and local wiring.

mod compose;
mod host;
mod mailbox;
mod settings;

pub use compose::InMemoryComposeHost;
pub use host::{InMemoryWindowHost, RecordingNotifier, StaticRuntimeInfo, TagStrippingConverter};
pub use mailbox::InMemoryMailbox;
pub use settings::InMemorySettingsStore;

use crate::dispatch::ports::HostApiError;

fn lock_poisoned(err: impl ToString) -> HostApiError {
    HostApiError::runtime(std::io::Error::other(err.to_string()))
}
