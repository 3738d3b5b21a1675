//! Adapter implementations for bridge ports.

mod in_process;

pub use in_process::{InProcessContext, InProcessTarget};
