//! Delivery port towards another message-passing context.

use crate::bridge::channel::InboundRequest;

/// A context that can receive request envelopes.
pub trait BridgeTarget: Send + Sync {
    /// Returns a name for diagnostics and error messages.
    fn name(&self) -> &str;

    /// Reports whether the context currently exists.
    fn is_reachable(&self) -> bool;

    /// Delivers a request asynchronously.
    ///
    /// Delivery to a context that has gone away is silently dropped; the
    /// caller then observes a timeout.
    fn post(&self, request: InboundRequest);
}
