//! Invocation of the external regify client executable.
//!
//! The client performs the actual encryption. It is started with encoded
//! arguments, works inside a fresh temporary workspace, and leaves its
//! result there as a `.rgf` file.

pub mod args;
pub mod client;
pub mod locator;
pub mod runner;
pub mod workspace;

#[cfg(test)]
mod tests;

pub use args::{ArgumentDecodeError, ClientArgument, decode_argument, encode_argument};
pub use client::{NativeClient, NativeClientError, ProcessClient};
pub use locator::{ClientLocator, program_files_candidate, regify_home};
pub use runner::{NativeError, NativeRunner, ResultFile};
pub use workspace::{RESULT_EXTENSION, TempWorkspace, WORKSPACE_PREFIX};

/// Install locations searched for the client, in priority order.
pub const DEFAULT_CLIENT_LOCATIONS: [&str; 5] = [
    "C:\\Program Files (x86)\\regify client\\regify_client.exe",
    "/usr/local/bin/regify_client",
    "/usr/bin/regify_client",
    "/Applications/regify client.app/Contents/MacOS/regify_client",
    "/Applications/regify client.app/Contents/MacOS/regify client",
];
