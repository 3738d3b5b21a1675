//! Domain model for dispatched operations and host mail data.
//!
//! These types normalise the two host object models (message view and
//! compose session) into shapes the dispatcher can work with uniformly.

mod address;
mod error;
mod host_info;
mod ids;
mod mail;
mod notification;
mod request;
mod window;

pub use address::{MailAddress, extract_mail, file_part};
pub use error::RequestDecodeError;
pub use host_info::{DEVICE_NAME, HostInfo, OperatingMode, normalize_platform};
pub use ids::{AttachmentId, ComposeTabId, MessageId, WindowId};
pub use mail::{
    AttachmentLocator, AttachmentRef, ComposeAttachment, ComposeDetails, ComposeDetailsPatch,
    MessageAttachment, MessageHeader, NewAttachment, NewComposeSession, REGIFY_CONTENT_TYPE,
};
pub use notification::Notification;
pub use request::{ContextMode, Operation, OperationRequest};
pub use window::{WindowGeometry, WindowSpec};
