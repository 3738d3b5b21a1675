//! Single-use reply channels.
//!
//! Every outbound call subscribes one listener in the caller's
//! [`ListenerRegistry`] and hands the remote a [`ReplyPort`] bound to that
//! listener. The first reply posted to the port is delivered and removes the
//! listener; anything posted afterwards finds no listener and is dropped.
//! Dropping the [`Subscription`] removes the listener too, so a call that
//! times out or is abandoned never leaves one behind.

use crate::bridge::domain::{ChannelId, Envelope};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use tracing::{debug, warn};

type PendingListeners = HashMap<ChannelId, oneshot::Sender<Envelope>>;

/// Listeners awaiting replies on one context.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    pending: Arc<Mutex<PendingListeners>>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener on a fresh channel.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let channel_id = ChannelId::new();
        let (sender, receiver) = oneshot::channel();
        let mut pending = self.lock();
        pending.insert(channel_id, sender);
        debug!(%channel_id, active = pending.len(), "listener registered");
        drop(pending);

        Subscription {
            channel_id,
            receiver,
            registry: self.clone(),
        }
    }

    /// Returns the number of listeners still waiting for a reply.
    #[must_use]
    pub fn active_listeners(&self) -> usize {
        self.lock().len()
    }

    fn deliver(&self, channel_id: ChannelId, envelope: Envelope) -> bool {
        let waiter = self.lock().remove(&channel_id);
        let Some(sender) = waiter else {
            warn!(
                %channel_id,
                direction = %envelope.direction(),
                "reply dropped: no listener on channel"
            );
            return false;
        };
        sender.send(envelope).is_ok()
    }

    fn release(&self, channel_id: ChannelId) -> bool {
        self.lock().remove(&channel_id).is_some()
    }

    fn lock(&self) -> MutexGuard<'_, PendingListeners> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Scoped ownership of one registered listener.
///
/// The listener is removed from its registry when the subscription is
/// dropped, whatever the outcome of the call.
#[derive(Debug)]
pub struct Subscription {
    channel_id: ChannelId,
    receiver: oneshot::Receiver<Envelope>,
    registry: ListenerRegistry,
}

impl Subscription {
    /// Returns the channel identifier.
    #[must_use]
    pub const fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    /// Returns a port the remote side can answer on.
    #[must_use]
    pub fn reply_port(&self) -> ReplyPort {
        ReplyPort {
            channel_id: self.channel_id,
            registry: self.registry.clone(),
        }
    }

    /// Waits for the reply.
    ///
    /// # Errors
    ///
    /// Returns [`oneshot::error::RecvError`] when the listener was removed
    /// without a reply being delivered.
    pub async fn recv(&mut self) -> Result<Envelope, oneshot::error::RecvError> {
        (&mut self.receiver).await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.registry.release(self.channel_id) {
            debug!(channel_id = %self.channel_id, "listener released without reply");
        }
    }
}

/// Remote end of a reply channel.
///
/// Cloning the port does not create a second channel: all clones target the
/// same listener and only the first post is delivered.
#[derive(Debug, Clone)]
pub struct ReplyPort {
    channel_id: ChannelId,
    registry: ListenerRegistry,
}

impl ReplyPort {
    /// Returns the channel identifier this port answers on.
    #[must_use]
    pub const fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    /// Posts a reply.
    ///
    /// Returns `false` when nobody is listening any more (duplicate reply,
    /// reply after timeout, or abandoned call).
    pub fn post(&self, envelope: Envelope) -> bool {
        self.registry.deliver(self.channel_id, envelope)
    }
}

/// A request envelope in flight, paired with the port for its reply.
#[derive(Debug)]
pub struct InboundRequest {
    /// The request envelope.
    pub envelope: Envelope,
    /// Where the single reply must be posted.
    pub reply: ReplyPort,
}
