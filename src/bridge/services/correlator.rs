//! Promise-style calls over single-use reply channels.

use crate::bridge::{
    channel::{InboundRequest, ListenerRegistry},
    domain::{BridgeError, BridgeResult, Direction, Envelope},
    ports::BridgeTarget,
};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Default time bound for a bridge call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_millis(5000);

/// Turns listener-based reply delivery into one awaitable outcome.
///
/// Each call races its reply against a timer. Exactly one of resolution or
/// rejection happens and the call's listener is released on every path,
/// including when the returned future is dropped mid-flight.
#[derive(Debug, Clone)]
pub struct Correlator {
    listeners: ListenerRegistry,
    request_direction: Direction,
    default_timeout: Duration,
}

impl Correlator {
    /// Creates a correlator tagging its requests with `request_direction`.
    #[must_use]
    pub fn new(request_direction: Direction) -> Self {
        Self {
            listeners: ListenerRegistry::new(),
            request_direction,
            default_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Overrides the time bound used by [`Self::call_with_default_timeout`].
    #[must_use]
    pub const fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Returns the listener registry replies are routed through.
    #[must_use]
    pub const fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Returns the configured default time bound.
    #[must_use]
    pub const fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Sends `message` to `target` and awaits its reply.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::TargetNotFound`] immediately when the target is
    /// unreachable, [`BridgeError::Timeout`] when no reply arrives within
    /// `timeout`, and [`BridgeError::Remote`] when the remote handler
    /// reported an application error.
    pub async fn call<T>(&self, target: &T, message: Value, timeout: Duration) -> BridgeResult<Value>
    where
        T: BridgeTarget + ?Sized,
    {
        if !target.is_reachable() {
            return Err(BridgeError::TargetNotFound {
                target: target.name().to_owned(),
            });
        }

        let mut subscription = self.listeners.subscribe();
        let channel_id = subscription.channel_id();
        target.post(InboundRequest {
            envelope: Envelope::request(self.request_direction, message),
            reply: subscription.reply_port(),
        });
        debug!(%channel_id, target = target.name(), "request posted");

        let envelope = match tokio::time::timeout(timeout, subscription.recv()).await {
            Ok(Ok(envelope)) => envelope,
            Ok(Err(_)) => return Err(BridgeError::ChannelClosed(channel_id)),
            Err(_) => {
                warn!(
                    %channel_id,
                    target = target.name(),
                    timeout_ms = timeout.as_millis(),
                    "bridge call timed out"
                );
                return Err(BridgeError::Timeout {
                    target: target.name().to_owned(),
                    timeout_ms: timeout.as_millis(),
                });
            }
        };

        let expected = self.request_direction.response();
        if envelope.direction() != expected {
            return Err(BridgeError::UnexpectedDirection {
                expected,
                actual: envelope.direction(),
            });
        }
        envelope.into_result().map_err(BridgeError::Remote)
    }

    /// Sends `message` using the default time bound.
    ///
    /// # Errors
    ///
    /// See [`Self::call`].
    pub async fn call_with_default_timeout<T>(&self, target: &T, message: Value) -> BridgeResult<Value>
    where
        T: BridgeTarget + ?Sized,
    {
        self.call(target, message, self.default_timeout).await
    }
}
