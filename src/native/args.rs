//! Encoding of user content passed on the client command line.
//!
//! Values are percent-encoded like a URI component and then base64
//! encoded, so that any UTF-8 text survives process argument boundaries on
//! every platform.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use thiserror::Error;

/// Characters escaped by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encodes `text` for the client command line.
#[must_use]
pub fn encode_argument(text: &str) -> String {
    let escaped = utf8_percent_encode(text, URI_COMPONENT).to_string();
    STANDARD.encode(escaped)
}

/// Errors raised while decoding an encoded argument.
#[derive(Debug, Error)]
pub enum ArgumentDecodeError {
    /// The value is not valid base64.
    #[error("argument is not base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded value is not valid UTF-8.
    #[error("argument is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Reverses [`encode_argument`].
///
/// # Errors
///
/// Returns [`ArgumentDecodeError`] when `encoded` is not an encoded
/// argument.
pub fn decode_argument(encoded: &str) -> Result<String, ArgumentDecodeError> {
    let raw = STANDARD.decode(encoded)?;
    let escaped = std::str::from_utf8(&raw)?;
    Ok(percent_decode_str(escaped).decode_utf8()?.into_owned())
}

/// One command-line argument for the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientArgument {
    /// Passed through unchanged (flags, fixed keywords).
    Plain(String),
    /// User content, passed through [`encode_argument`].
    Encoded(String),
    /// The workspace directory of the run, encoded.
    Workspace,
}

impl ClientArgument {
    /// Renders the argument for a run using `workspace`.
    #[must_use]
    pub fn render(&self, workspace: &str) -> String {
        match self {
            Self::Plain(value) => value.clone(),
            Self::Encoded(value) => encode_argument(value),
            Self::Workspace => encode_argument(workspace),
        }
    }
}
