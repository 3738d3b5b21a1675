//! Port contracts for bridge delivery and request handling.

mod handler;
mod target;

pub use handler::RequestHandler;
pub use target::BridgeTarget;
