//! Regimail: core of the regify mail client add-on.
//!
//! The add-on hosts the sandboxed regify application in a helper window and
//! answers its requests for message data on the application's behalf.
//!
//! # Architecture
//!
//! Regimail follows hexagonal architecture principles:
//!
//! - **Domain**: Requests, context modes, and mail data with no host
//!   dependencies
//! - **Ports**: Trait interfaces for the mail client's APIs
//! - **Adapters**: In-memory hosts, a JSON settings file, and process
//!   execution
//!
//! # Modules
//!
//! - [`bridge`]: Correlated request/response calls between the add-on and
//!   the application frame, with timeouts
//! - [`dispatch`]: Context resolution and execution of application requests
//! - [`addon`]: Toolbar actions, selection tracking, and server location
//! - [`native`]: Invocation of the native regify client
//! - [`config`]: Runtime configuration
//! - [`telemetry`]: Structured logging setup

pub mod addon;
pub mod bridge;
pub mod config;
pub mod dispatch;
pub mod native;
pub mod telemetry;
