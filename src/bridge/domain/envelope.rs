//! Envelopes exchanged between the host page and the sandboxed frame.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Origin tag carried by every envelope.
///
/// The serialised forms match the tags used by the regify web application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Request sent by the host page to the frame.
    FromParent,
    /// Request sent by the frame to the host page.
    FromIframe,
    /// Reply produced by the host page.
    ParentResponse,
    /// Reply produced by the frame.
    IframeResponse,
}

impl Direction {
    /// Returns the canonical wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FromParent => "from_parent",
            Self::FromIframe => "from_iframe",
            Self::ParentResponse => "parent_response",
            Self::IframeResponse => "iframe_response",
        }
    }

    /// Returns the tag a reply to this envelope must carry.
    ///
    /// Response tags map to themselves.
    #[must_use]
    pub const fn response(self) -> Self {
        match self {
            Self::FromParent | Self::IframeResponse => Self::IframeResponse,
            Self::FromIframe | Self::ParentResponse => Self::ParentResponse,
        }
    }

    /// Returns `true` for request tags.
    #[must_use]
    pub const fn is_request(self) -> bool {
        matches!(self, Self::FromParent | Self::FromIframe)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalised error shape carried across the channel boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Stable machine-readable error code.
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl ErrorPayload {
    /// Creates an error payload.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Application payload of an envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "data")]
pub enum Payload {
    /// A JSON-serialisable value.
    Value(Value),
    /// An application-level error.
    Error(ErrorPayload),
}

/// Message unit exchanged over a bridge channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    direction: Direction,
    payload: Payload,
}

impl Envelope {
    /// Creates a request envelope.
    #[must_use]
    pub const fn request(direction: Direction, message: Value) -> Self {
        Self {
            direction,
            payload: Payload::Value(message),
        }
    }

    /// Creates a response envelope from a handler outcome.
    #[must_use]
    pub fn response(direction: Direction, outcome: Result<Value, ErrorPayload>) -> Self {
        let payload = match outcome {
            Ok(value) => Payload::Value(value),
            Err(error) => Payload::Error(error),
        };
        Self { direction, payload }
    }

    /// Returns the origin tag.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the payload.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Consumes the envelope, returning its payload as a result.
    ///
    /// # Errors
    ///
    /// Returns the carried [`ErrorPayload`] when the envelope holds an
    /// application error.
    pub fn into_result(self) -> Result<Value, ErrorPayload> {
        match self.payload {
            Payload::Value(value) => Ok(value),
            Payload::Error(error) => Err(error),
        }
    }
}
