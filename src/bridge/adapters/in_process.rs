//! In-process transport backed by tokio channels.

use crate::bridge::{
    channel::InboundRequest,
    ports::{BridgeTarget, RequestHandler},
    services::{ContextRole, serve},
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Delivery handle towards a context running in this process.
#[derive(Debug, Clone)]
pub struct InProcessTarget {
    name: String,
    sender: mpsc::UnboundedSender<InboundRequest>,
}

impl InProcessTarget {
    /// Creates a target and the inbox its requests arrive on.
    #[must_use]
    pub fn channel(name: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<InboundRequest>) {
        let (sender, inbox) = mpsc::unbounded_channel();
        (
            Self {
                name: name.into(),
                sender,
            },
            inbox,
        )
    }
}

impl BridgeTarget for InProcessTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_reachable(&self) -> bool {
        !self.sender.is_closed()
    }

    fn post(&self, request: InboundRequest) {
        if self.sender.send(request).is_err() {
            debug!(target = %self.name, "context gone; request dropped");
        }
    }
}

/// A context served by a spawned listener task.
#[derive(Debug)]
pub struct InProcessContext {
    target: InProcessTarget,
    task: JoinHandle<()>,
}

impl InProcessContext {
    /// Spawns a listener for `role` that answers with `handler`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn<H>(name: impl Into<String>, role: ContextRole, handler: Arc<H>) -> Self
    where
        H: RequestHandler + ?Sized + 'static,
    {
        let (target, inbox) = InProcessTarget::channel(name);
        let task = tokio::spawn(serve(inbox, role.accepted_direction(), handler));
        Self { target, task }
    }

    /// Returns a delivery handle for this context.
    #[must_use]
    pub fn target(&self) -> InProcessTarget {
        self.target.clone()
    }

    /// Stops serving. Requests posted afterwards are dropped.
    pub fn close(self) {
        self.task.abort();
    }
}
