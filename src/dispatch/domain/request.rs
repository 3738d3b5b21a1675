//! Operation requests sent by the sandboxed application.
//!
//! A request is a JSON object with an `op` name, an optional `mode`, and
//! operation-specific fields. It is decoded once into an [`Operation`] so
//! that handlers never look at raw JSON.

use super::RequestDecodeError;
use serde_json::{Map, Value};
use std::fmt;

/// Which host object model an operation targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContextMode {
    /// The message view and its selected message.
    #[default]
    Read,
    /// The active compose session.
    Compose,
}

impl ContextMode {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Compose => "compose",
        }
    }

    /// Interprets a request's `mode` field.
    ///
    /// Absent, null, and empty values select [`ContextMode::Read`]. Any
    /// value other than `"read"` or `"compose"` yields `None` rather than
    /// falling back to compose.
    #[must_use]
    pub fn from_field(value: Option<&Value>) -> Option<Self> {
        match value {
            None | Some(Value::Null) => Some(Self::Read),
            Some(Value::String(mode)) => match mode.as_str() {
                "" | "read" => Some(Self::Read),
                "compose" => Some(Self::Compose),
                _ => None,
            },
            Some(_) => None,
        }
    }
}

impl fmt::Display for ContextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Close the helper window.
    Close,
    /// Show a notification.
    ShowNotifier {
        /// Text to display.
        message: String,
        /// Whether the text reports a failure.
        is_error: bool,
    },
    /// Open a new compose session.
    Reply {
        /// Primary recipients.
        recipients: Vec<String>,
        /// Subject line.
        subject: String,
        /// Plain body; newlines become line breaks.
        body: String,
    },
    /// Store or delete a setting.
    SetSetting {
        /// Setting name.
        key: String,
        /// New value; `None` deletes the setting.
        value: Option<Value>,
    },
    /// Read one setting.
    GetSetting {
        /// Setting name.
        key: String,
    },
    /// Read all settings.
    GetAll,
    /// Describe the host.
    GetHostInfo,
    /// Name of the attachment at a 1-based index.
    GetAttachmentFilename {
        /// 1-based attachment index.
        id: u64,
    },
    /// Content of the attachment at a 1-based index.
    GetAttachmentBinary {
        /// 1-based attachment index.
        id: u64,
    },
    /// Subject of the active entity.
    GetSubject,
    /// Bare addresses of primary and carbon-copy recipients.
    GetRecipients,
    /// Bare address of the sender.
    GetSender,
    /// HTML body of the compose session.
    GetBodyHtml,
    /// Plain-text body of the compose session.
    GetBodyPlain,
    /// Replace all attachments of the compose session with one file.
    SetAttachment {
        /// Path or name of the file; only the file part is used.
        filename: String,
        /// File content.
        attachment: Vec<u8>,
    },
    /// Replace the body of the compose session.
    SetBodyHtml {
        /// New HTML body.
        body: String,
    },
    /// An operation name this dispatcher does not know.
    Unsupported {
        /// The unrecognised name.
        op: String,
    },
}

impl Operation {
    /// Returns the wire name of the operation.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Close => "close",
            Self::ShowNotifier { .. } => "showNotifier",
            Self::Reply { .. } => "reply",
            Self::SetSetting { .. } => "setSetting",
            Self::GetSetting { .. } => "getSetting",
            Self::GetAll => "getAll",
            Self::GetHostInfo => "getHostInfo",
            Self::GetAttachmentFilename { .. } => "getAttachmentFilename",
            Self::GetAttachmentBinary { .. } => "getAttachmentBinary",
            Self::GetSubject => "getSubject",
            Self::GetRecipients => "getRecipients",
            Self::GetSender => "getSender",
            Self::GetBodyHtml => "getBodyHTML",
            Self::GetBodyPlain => "getBodyPlain",
            Self::SetAttachment { .. } => "setAttachment",
            Self::SetBodyHtml { .. } => "setBodyHTML",
            Self::Unsupported { op } => op,
        }
    }

    /// Returns `true` for operations that act on a message or compose
    /// session and therefore need a resolved context.
    #[must_use]
    pub const fn needs_context(&self) -> bool {
        matches!(
            self,
            Self::GetAttachmentFilename { .. }
                | Self::GetAttachmentBinary { .. }
                | Self::GetSubject
                | Self::GetRecipients
                | Self::GetSender
                | Self::GetBodyHtml
                | Self::GetBodyPlain
                | Self::SetAttachment { .. }
                | Self::SetBodyHtml { .. }
        )
    }

    /// Returns `true` for operations only meaningful in compose mode.
    #[must_use]
    pub const fn compose_only(&self) -> bool {
        matches!(
            self,
            Self::GetBodyHtml | Self::GetBodyPlain | Self::SetAttachment { .. } | Self::SetBodyHtml { .. }
        )
    }
}

/// A decoded request: operation plus the mode it was sent with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    operation: Operation,
    mode: Option<ContextMode>,
}

impl OperationRequest {
    /// Creates a request for `operation` in `mode`.
    #[must_use]
    pub const fn new(operation: Operation, mode: ContextMode) -> Self {
        Self {
            operation,
            mode: Some(mode),
        }
    }

    /// Decodes a raw request payload.
    ///
    /// Unknown operation names decode to [`Operation::Unsupported`].
    ///
    /// # Errors
    ///
    /// Returns [`RequestDecodeError`] when the payload is not an object,
    /// lacks an `op`, or carries fields of the wrong shape.
    pub fn decode(payload: &Value) -> Result<Self, RequestDecodeError> {
        let fields = payload.as_object().ok_or(RequestDecodeError::NotAnObject)?;
        let op = fields
            .get("op")
            .and_then(Value::as_str)
            .ok_or(RequestDecodeError::MissingOp)?;
        let reader = FieldReader { op, fields };

        let operation = match op {
            "close" => Operation::Close,
            "showNotifier" => Operation::ShowNotifier {
                message: reader.optional_string("message")?,
                is_error: reader.optional_bool("isError")?,
            },
            "reply" => Operation::Reply {
                recipients: reader.recipients("recipients")?,
                subject: reader.optional_string("subject")?,
                body: reader.required_string("body")?,
            },
            "setSetting" => Operation::SetSetting {
                key: reader.required_string("key")?,
                value: fields.get("value").filter(|value| !value.is_null()).cloned(),
            },
            "getSetting" => Operation::GetSetting {
                key: reader.required_string("key")?,
            },
            "getAll" => Operation::GetAll,
            "getHostInfo" => Operation::GetHostInfo,
            "getAttachmentFilename" => Operation::GetAttachmentFilename {
                id: reader.index("id")?,
            },
            "getAttachmentBinary" => Operation::GetAttachmentBinary {
                id: reader.index("id")?,
            },
            "getSubject" => Operation::GetSubject,
            "getRecipients" => Operation::GetRecipients,
            "getSender" => Operation::GetSender,
            "getBodyHTML" => Operation::GetBodyHtml,
            "getBodyPlain" => Operation::GetBodyPlain,
            "setAttachment" => Operation::SetAttachment {
                filename: reader.required_string("filename")?,
                attachment: reader.bytes("attachment")?,
            },
            "setBodyHTML" => Operation::SetBodyHtml {
                body: reader.required_string("body")?,
            },
            other => Operation::Unsupported {
                op: other.to_owned(),
            },
        };

        Ok(Self {
            operation,
            mode: ContextMode::from_field(fields.get("mode")),
        })
    }

    /// Returns the decoded operation.
    #[must_use]
    pub const fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Returns the requested mode, or `None` when the request named an
    /// unrecognised mode.
    #[must_use]
    pub const fn mode(&self) -> Option<ContextMode> {
        self.mode
    }
}

struct FieldReader<'a> {
    op: &'a str,
    fields: &'a Map<String, Value>,
}

impl FieldReader<'_> {
    fn missing(&self, field: &'static str) -> RequestDecodeError {
        RequestDecodeError::MissingField {
            op: self.op.to_owned(),
            field,
        }
    }

    fn invalid(&self, field: &'static str, expected: &'static str) -> RequestDecodeError {
        RequestDecodeError::InvalidField {
            op: self.op.to_owned(),
            field,
            expected,
        }
    }

    fn present(&self, field: &'static str) -> Option<&Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    fn required_string(&self, field: &'static str) -> Result<String, RequestDecodeError> {
        let value = self.present(field).ok_or_else(|| self.missing(field))?;
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.invalid(field, "a string"))
    }

    fn optional_string(&self, field: &'static str) -> Result<String, RequestDecodeError> {
        match self.present(field) {
            None => Ok(String::new()),
            Some(value) => value
                .as_str()
                .map(str::to_owned)
                .ok_or_else(|| self.invalid(field, "a string")),
        }
    }

    fn optional_bool(&self, field: &'static str) -> Result<bool, RequestDecodeError> {
        match self.present(field) {
            None => Ok(false),
            Some(value) => value.as_bool().ok_or_else(|| self.invalid(field, "a boolean")),
        }
    }

    fn index(&self, field: &'static str) -> Result<u64, RequestDecodeError> {
        let value = self.present(field).ok_or_else(|| self.missing(field))?;
        value
            .as_u64()
            .ok_or_else(|| self.invalid(field, "a non-negative integer"))
    }

    fn recipients(&self, field: &'static str) -> Result<Vec<String>, RequestDecodeError> {
        match self.present(field) {
            None => Ok(Vec::new()),
            Some(Value::String(single)) => Ok(vec![single.clone()]),
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|entry| {
                    entry
                        .as_str()
                        .map(str::to_owned)
                        .ok_or_else(|| self.invalid(field, "a list of strings"))
                })
                .collect(),
            Some(_) => Err(self.invalid(field, "a list of strings")),
        }
    }

    fn bytes(&self, field: &'static str) -> Result<Vec<u8>, RequestDecodeError> {
        let value = self.present(field).ok_or_else(|| self.missing(field))?;
        let entries = value
            .as_array()
            .ok_or_else(|| self.invalid(field, "an array of bytes"))?;
        entries
            .iter()
            .map(|entry| {
                entry
                    .as_u64()
                    .and_then(|byte| u8::try_from(byte).ok())
                    .ok_or_else(|| self.invalid(field, "an array of bytes"))
            })
            .collect()
    }
}
