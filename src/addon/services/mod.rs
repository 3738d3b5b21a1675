//! Add-on services: server location and toolbar workflow.

mod error;
mod locator;
mod workflow;

pub use error::{AddonError, AddonResult};
pub use locator::{DEFAULT_SERVER_COUNT, DEFAULT_SERVER_DOMAIN, ServerLocator};
pub use workflow::AddonWorkflow;
