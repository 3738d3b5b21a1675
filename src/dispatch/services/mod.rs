//! Dispatch services: session state, context resolution, helper window,
//! and the command dispatcher itself.

mod context;
mod dispatcher;
mod error;
mod host_info;
mod session;
mod window;

pub use context::{ComposeContext, ContextResolver, ReadContext, ResolvedContext};
pub use dispatcher::{CommandDispatcher, HostServices};
pub use error::{DispatchError, DispatchResult};
pub use host_info::{MACHINE_ID_KEY, describe_host, device_id, setting_text};
pub use session::{SessionSnapshot, SessionState};
pub use window::{DEFAULT_WINDOW_SIZE, HelperWindow};
