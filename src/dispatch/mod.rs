//! Command dispatch for requests coming from the sandboxed application.
//!
//! The dispatcher decodes an operation plus a context mode, resolves the
//! backing accessor ("read" message view or "compose" session), runs the
//! operation, and returns a JSON value. The module follows hexagonal
//! architecture:
//!
//! - Request, mail, and host-info types in [`domain`]
//! - Host API contracts in [`ports`]
//! - In-memory and file-backed implementations in [`adapters`]
//! - The dispatcher, context resolver, and session state in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
