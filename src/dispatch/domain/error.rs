//! Errors raised while decoding operation requests.

use thiserror::Error;

/// A request payload that does not have the shape its operation needs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestDecodeError {
    /// The payload is not a JSON object.
    #[error("request must be a JSON object")]
    NotAnObject,

    /// The payload carries no string `op` field.
    #[error("request is missing the 'op' field")]
    MissingOp,

    /// A required field is absent.
    #[error("operation '{op}' requires field '{field}'")]
    MissingField {
        /// Operation name.
        op: String,
        /// Missing field name.
        field: &'static str,
    },

    /// A field holds a value of the wrong type.
    #[error("field '{field}' of operation '{op}' must be {expected}")]
    InvalidField {
        /// Operation name.
        op: String,
        /// Offending field name.
        field: &'static str,
        /// Description of the accepted shape.
        expected: &'static str,
    },
}
