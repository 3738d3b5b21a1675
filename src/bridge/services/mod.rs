//! Bridge services: call correlation, endpoints, and request serving.

mod correlator;
mod endpoint;
mod listener;

pub use correlator::{Correlator, DEFAULT_CALL_TIMEOUT};
pub use endpoint::{ContextRole, FrameEndpoint, ParentEndpoint};
pub use listener::serve;
