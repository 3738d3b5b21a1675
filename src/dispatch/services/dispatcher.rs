//! The command dispatcher serving requests from the regify application.

use super::{
    ComposeContext, ContextResolver, DispatchError, DispatchResult, HelperWindow, ResolvedContext,
    SessionState, describe_host,
};
use crate::bridge::{domain::ErrorPayload, ports::RequestHandler};
use crate::dispatch::{
    domain::{
        AttachmentRef, ContextMode, DEVICE_NAME, ComposeDetailsPatch, NewAttachment,
        NewComposeSession, Notification, Operation, OperationRequest, extract_mail,
    },
    ports::{
        ComposeAccessor, HostApiError, MessageAccessor, Notifier, RuntimeInfo, SettingsStore,
        TextConverter, WindowHost,
    },
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Host API handles the dispatcher works against.
#[derive(Clone)]
pub struct HostServices {
    /// Persistent settings.
    pub settings: Arc<dyn SettingsStore>,
    /// Message view.
    pub messages: Arc<dyn MessageAccessor>,
    /// Compose sessions.
    pub compose: Arc<dyn ComposeAccessor>,
    /// Popup windows.
    pub windows: Arc<dyn WindowHost>,
    /// User notifications.
    pub notifier: Arc<dyn Notifier>,
    /// Platform and version facts.
    pub runtime: Arc<dyn RuntimeInfo>,
    /// HTML to text conversion.
    pub text: Arc<dyn TextConverter>,
}

/// Executes operation requests against the host.
///
/// Context-free operations (window, notifications, settings, host info)
/// run directly. Every other operation resolves its context first, so a
/// missing message selection or compose session fails before any host
/// call is made.
#[derive(Clone)]
pub struct CommandDispatcher {
    host: HostServices,
    session: Arc<SessionState>,
    resolver: ContextResolver,
    window: HelperWindow,
    device_name: String,
}

impl CommandDispatcher {
    /// Creates a dispatcher over `host` and the shared `session`.
    #[must_use]
    pub fn new(host: HostServices, session: Arc<SessionState>) -> Self {
        let resolver = ContextResolver::new(
            Arc::clone(&host.messages),
            Arc::clone(&host.compose),
            Arc::clone(&session),
        );
        let window = HelperWindow::new(
            Arc::clone(&host.windows),
            Arc::clone(&host.settings),
            Arc::clone(&session),
        );
        Self {
            host,
            session,
            resolver,
            window,
            device_name: DEVICE_NAME.to_owned(),
        }
    }

    /// Overrides the device-class label reported by `getHostInfo`.
    #[must_use]
    pub fn with_device_name(mut self, device_name: impl Into<String>) -> Self {
        self.device_name = device_name.into();
        self
    }

    /// Replaces the helper-window manager.
    #[must_use]
    pub fn with_helper_window(mut self, window: HelperWindow) -> Self {
        self.window = window;
        self
    }

    /// Returns the shared session.
    #[must_use]
    pub const fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    /// Returns the helper-window manager.
    #[must_use]
    pub const fn helper_window(&self) -> &HelperWindow {
        &self.window
    }

    /// Decodes and executes a raw request payload.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidRequest`] for malformed payloads and
    /// every failure of [`Self::execute`].
    pub async fn dispatch(&self, payload: &Value) -> DispatchResult<Value> {
        let request = OperationRequest::decode(payload)?;
        self.execute(&request).await
    }

    /// Executes a decoded request.
    ///
    /// Unknown operations, unknown modes, and compose-only operations sent
    /// in read mode resolve to `null`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NoActiveContext`] when the mode has no
    /// active entity, [`DispatchError::AttachmentRemoval`] when clearing
    /// compose attachments fails, and host or settings failures otherwise.
    pub async fn execute(&self, request: &OperationRequest) -> DispatchResult<Value> {
        let operation = request.operation();
        debug!(op = operation.name(), mode = ?request.mode(), "dispatching request");

        match operation {
            Operation::Close => {
                self.window.close().await?;
                Ok(Value::Bool(true))
            }
            Operation::ShowNotifier { message, is_error } => {
                let notification = if *is_error {
                    Notification::error(message.as_str())
                } else {
                    Notification::info(message.as_str())
                };
                self.host.notifier.notify(&notification).await?;
                Ok(Value::Bool(true))
            }
            Operation::Reply {
                recipients,
                subject,
                body,
            } => {
                let session = NewComposeSession {
                    to: recipients.clone(),
                    subject: subject.clone(),
                    body: body.replace('\n', "<br>"),
                };
                let tab = self.host.compose.begin_new(&session).await?;
                debug!(%tab, "reply compose session opened");
                Ok(Value::Bool(true))
            }
            Operation::SetSetting { key, value } => {
                match value {
                    Some(stored) => self.host.settings.set(key, stored.clone()).await?,
                    None => self.host.settings.delete(key).await?,
                }
                Ok(Value::Bool(true))
            }
            Operation::GetSetting { key } => {
                Ok(self.host.settings.get(key).await?.unwrap_or(Value::Null))
            }
            Operation::GetAll => Ok(Value::Object(self.host.settings.get_all().await?)),
            Operation::GetHostInfo => {
                let info = describe_host(
                    self.host.settings.as_ref(),
                    self.host.runtime.as_ref(),
                    &self.device_name,
                )
                .await?;
                serde_json::to_value(info).map_err(|err| HostApiError::runtime(err).into())
            }
            Operation::Unsupported { op } => {
                warn!(op = op.as_str(), "unsupported operation");
                Ok(Value::Null)
            }
            contextual => self.execute_in_context(contextual, request.mode()).await,
        }
    }

    async fn execute_in_context(
        &self,
        operation: &Operation,
        requested: Option<ContextMode>,
    ) -> DispatchResult<Value> {
        let Some(mode) = requested else {
            warn!(op = operation.name(), "unsupported context mode");
            return Ok(Value::Null);
        };
        if operation.compose_only() && mode == ContextMode::Read {
            warn!(op = operation.name(), "operation requires compose mode");
            return Ok(Value::Null);
        }
        let context = self.resolver.resolve(mode)?;

        match operation {
            Operation::GetAttachmentFilename { id } => {
                let attachments = context.attachments().await?;
                let name = attachment_at(&attachments, *id)
                    .map(|attachment| attachment.name.clone())
                    .unwrap_or_default();
                Ok(Value::String(name))
            }
            Operation::GetAttachmentBinary { id } => {
                let attachments = context.attachments().await?;
                let Some(attachment) = attachment_at(&attachments, *id) else {
                    return Ok(Value::String(String::new()));
                };
                Ok(context
                    .attachment_bytes(&attachment.locator)
                    .await?
                    .map_or(Value::Null, bytes_value))
            }
            Operation::GetSubject => Ok(Value::String(context.subject().await?)),
            Operation::GetRecipients => Ok(Value::Array(
                context
                    .recipients()
                    .await?
                    .iter()
                    .map(|recipient| Value::String(extract_mail(recipient)))
                    .collect(),
            )),
            Operation::GetSender => Ok(Value::String(extract_mail(&context.sender().await?))),
            compose_only => match &context {
                ResolvedContext::Compose(compose) => {
                    self.execute_compose(compose_only, compose).await
                }
                ResolvedContext::Read(_) => Ok(Value::Null),
            },
        }
    }

    async fn execute_compose(
        &self,
        operation: &Operation,
        compose: &ComposeContext,
    ) -> DispatchResult<Value> {
        match operation {
            Operation::GetBodyHtml => {
                let details = compose.details().await?;
                let body = if details.is_plain_text {
                    wrap_plain_text(&details.body)
                } else {
                    details.body
                };
                Ok(Value::String(body))
            }
            Operation::GetBodyPlain => Ok(Value::String(compose.details().await?.plain_text_body)),
            Operation::SetAttachment {
                filename,
                attachment,
            } => {
                replace_attachments(compose, filename, attachment).await?;
                Ok(Value::Bool(true))
            }
            Operation::SetBodyHtml { body } => {
                let details = compose.details().await?;
                let patch = if details.is_plain_text {
                    let plain = self.host.text.convert_to_plain_text(body, true).await?;
                    ComposeDetailsPatch::plain_text_body(plain)
                } else {
                    ComposeDetailsPatch::html_body(body.as_str())
                };
                compose.set_details(&patch).await?;
                Ok(Value::Bool(true))
            }
            other => {
                warn!(op = other.name(), "operation has no compose handler");
                Ok(Value::Null)
            }
        }
    }
}

#[async_trait]
impl RequestHandler for CommandDispatcher {
    async fn handle(&self, payload: Value) -> Result<Value, ErrorPayload> {
        self.dispatch(&payload).await.map_err(|err| {
            error!(code = err.code(), error = %err, "request failed");
            ErrorPayload::from(&err)
        })
    }
}

/// Returns the attachment at a 1-based index.
fn attachment_at(attachments: &[AttachmentRef], id: u64) -> Option<&AttachmentRef> {
    let index = usize::try_from(id).ok()?.checked_sub(1)?;
    attachments.get(index)
}

fn bytes_value(bytes: Vec<u8>) -> Value {
    Value::Array(bytes.into_iter().map(Value::from).collect())
}

/// Wraps a plain-text body in a minimal HTML document.
fn wrap_plain_text(body: &str) -> String {
    format!("\n<html>\n<head><meta charset=\"utf-8\"></head>\n<body>\n{body}\n</body>\n</html>\n")
}

/// Removes every attachment (last to first) and adds the regimail file.
async fn replace_attachments(
    compose: &ComposeContext,
    filename: &str,
    bytes: &[u8],
) -> DispatchResult<()> {
    let existing = compose.attachments().await?;
    for attachment in existing.iter().rev() {
        if let Err(source) = compose.remove_attachment(attachment.id).await {
            error!(
                tab = %compose.tab(),
                attachment = %attachment.name,
                error = %source,
                "attachment removal failed"
            );
            return Err(DispatchError::AttachmentRemoval {
                name: attachment.name.clone(),
                source,
            });
        }
    }
    let added = compose
        .add_attachment(&NewAttachment::regimail(filename, bytes.to_vec()))
        .await?;
    debug!(tab = %compose.tab(), attachment = %added.name, "regimail attached");
    Ok(())
}
