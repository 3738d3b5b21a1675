//! Receiving-side handler contract.

use crate::bridge::domain::ErrorPayload;
use async_trait::async_trait;
use serde_json::Value;

/// Services decoded request payloads for one context.
///
/// Implementations normalise their failures into [`ErrorPayload`] so that
/// nothing but plain data crosses the channel boundary.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Handles one request payload.
    async fn handle(&self, payload: Value) -> Result<Value, ErrorPayload>;
}
