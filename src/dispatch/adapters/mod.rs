//! Adapter implementations for dispatch ports.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileSettingsStore;
pub use memory::{
    InMemoryComposeHost, InMemoryMailbox, InMemorySettingsStore, InMemoryWindowHost,
    RecordingNotifier, StaticRuntimeInfo, TagStrippingConverter,
};
