//! Host-page and frame endpoints of a bridge link.

use super::Correlator;
use crate::bridge::{
    domain::{BridgeError, BridgeResult, Direction},
    ports::BridgeTarget,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// Which side of the link a context plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextRole {
    /// The host page embedding the sandboxed application.
    Parent,
    /// The sandboxed application frame.
    Frame,
}

impl ContextRole {
    /// Tag this role puts on the requests it sends.
    #[must_use]
    pub const fn request_direction(self) -> Direction {
        match self {
            Self::Parent => Direction::FromParent,
            Self::Frame => Direction::FromIframe,
        }
    }

    /// Tag of the requests this role serves.
    #[must_use]
    pub const fn accepted_direction(self) -> Direction {
        match self {
            Self::Parent => Direction::FromIframe,
            Self::Frame => Direction::FromParent,
        }
    }
}

/// Host-page endpoint: asks frames attached by identifier.
pub struct ParentEndpoint {
    correlator: Correlator,
    frames: RwLock<HashMap<String, Arc<dyn BridgeTarget>>>,
}

impl ParentEndpoint {
    /// Creates an endpoint with no frames attached.
    #[must_use]
    pub fn new(default_timeout: Duration) -> Self {
        Self {
            correlator: Correlator::new(ContextRole::Parent.request_direction())
                .with_default_timeout(default_timeout),
            frames: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the correlator used for outbound calls.
    #[must_use]
    pub const fn correlator(&self) -> &Correlator {
        &self.correlator
    }

    /// Attaches a frame under `frame_id`, replacing any previous one.
    pub fn attach_frame(&self, frame_id: impl Into<String>, frame: Arc<dyn BridgeTarget>) {
        self.frames
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(frame_id.into(), frame);
    }

    /// Detaches a frame. Returns `true` when one was attached.
    pub fn detach_frame(&self, frame_id: &str) -> bool {
        self.frames
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(frame_id)
            .is_some()
    }

    /// Asks the frame attached as `frame_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::TargetNotFound`] when no such frame is
    /// attached, plus every failure of [`Correlator::call`].
    pub async fn ask_frame(
        &self,
        frame_id: &str,
        message: Value,
        timeout: Option<Duration>,
    ) -> BridgeResult<Value> {
        let frame = self
            .frames
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(frame_id)
            .cloned()
            .ok_or_else(|| BridgeError::TargetNotFound {
                target: frame_id.to_owned(),
            })?;
        let bound = timeout.unwrap_or_else(|| self.correlator.default_timeout());
        self.correlator.call(frame.as_ref(), message, bound).await
    }
}

/// Frame endpoint: asks its parent.
pub struct FrameEndpoint {
    correlator: Correlator,
    parent: Arc<dyn BridgeTarget>,
}

impl FrameEndpoint {
    /// Creates a frame endpoint bound to `parent`.
    #[must_use]
    pub fn new(parent: Arc<dyn BridgeTarget>, default_timeout: Duration) -> Self {
        Self {
            correlator: Correlator::new(ContextRole::Frame.request_direction())
                .with_default_timeout(default_timeout),
            parent,
        }
    }

    /// Returns the correlator used for outbound calls.
    #[must_use]
    pub const fn correlator(&self) -> &Correlator {
        &self.correlator
    }

    /// Asks the parent.
    ///
    /// # Errors
    ///
    /// Returns every failure of [`Correlator::call`].
    pub async fn ask_parent(&self, message: Value, timeout: Option<Duration>) -> BridgeResult<Value> {
        let bound = timeout.unwrap_or_else(|| self.correlator.default_timeout());
        self.correlator
            .call(self.parent.as_ref(), message, bound)
            .await
    }
}
