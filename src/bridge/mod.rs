//! Parent–frame request/response bridge.
//!
//! The bridge carries one request at a time per call between the host page
//! and the sandboxed regify application, awaiting exactly one reply or a
//! timeout. The module follows hexagonal architecture:
//!
//! - Envelope, identifier, and error types in [`domain`]
//! - Single-use reply channels and listener bookkeeping in [`channel`]
//! - Port contracts for delivery targets and request handlers in [`ports`]
//! - The correlator, endpoints, and request listener in [`services`]
//! - An in-process tokio transport in [`adapters`]

pub mod adapters;
pub mod channel;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
