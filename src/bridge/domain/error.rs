//! Failures surfaced by bridge calls.

use super::{ChannelId, Direction, ErrorPayload};
use thiserror::Error;

/// Result type for bridge calls.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Errors returned by [`crate::bridge::services::Correlator::call`].
///
/// None of these are retried inside the bridge.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// The target context does not exist or has no live window.
    #[error("{target} element not found")]
    TargetNotFound {
        /// Name of the missing target.
        target: String,
    },

    /// No reply arrived within the call's time bound.
    #[error("timeout waiting for {target} response after {timeout_ms} ms")]
    Timeout {
        /// Name of the target that did not answer.
        target: String,
        /// Time bound in milliseconds.
        timeout_ms: u128,
    },

    /// The remote handler reported an application error.
    #[error("remote error: {0}")]
    Remote(ErrorPayload),

    /// The reply channel was torn down before a reply arrived.
    #[error("reply channel {0} closed without a response")]
    ChannelClosed(ChannelId),

    /// A reply arrived carrying a tag that does not answer the request.
    #[error("unexpected {actual} envelope (expected {expected})")]
    UnexpectedDirection {
        /// Tag the caller was waiting for.
        expected: Direction,
        /// Tag that arrived.
        actual: Direction,
    },
}
