//! Domain model for bridge envelopes and call failures.

mod envelope;
mod error;
mod ids;

pub use envelope::{Direction, Envelope, ErrorPayload, Payload};
pub use error::{BridgeError, BridgeResult};
pub use ids::ChannelId;
