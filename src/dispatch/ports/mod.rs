//! Port contracts for the host APIs the dispatcher consumes.
//!
//! Every host object model (message view, compose sessions, windows,
//! notifications, settings, runtime) is reached through one of these
//! traits so the dispatcher can run against in-memory doubles.

pub mod host;
pub mod mail;
pub mod settings;

pub use host::{HostApiError, HostApiResult, Notifier, RuntimeInfo, TextConverter, WindowHost};
pub use mail::{ComposeAccessor, MessageAccessor};
pub use settings::{SettingsStore, SettingsStoreError, SettingsStoreResult};
