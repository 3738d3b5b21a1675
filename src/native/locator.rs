//! Discovery of the installed native client.

use crate::config::AddonConfig;
use crate::dispatch::services::SessionState;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Environment variable naming the Windows program files directory.
const PROGRAM_FILES_VAR: &str = "ProgramFiles";

/// Returns `true` when `path` names an existing regular file.
pub(crate) fn file_exists(path: &Utf8Path) -> bool {
    path.is_file()
}

/// Finds the client executable and caches the result in the session.
#[derive(Clone)]
pub struct ClientLocator {
    candidates: Vec<Utf8PathBuf>,
    session: Arc<SessionState>,
}

impl ClientLocator {
    /// Creates a locator searching `candidates` in order.
    #[must_use]
    pub const fn new(candidates: Vec<Utf8PathBuf>, session: Arc<SessionState>) -> Self {
        Self {
            candidates,
            session,
        }
    }

    /// Creates a locator over the configured locations followed by the
    /// program files directory of the current environment, when set.
    #[must_use]
    pub fn from_config(config: &AddonConfig, session: Arc<SessionState>) -> Self {
        let program_files = std::env::var(PROGRAM_FILES_VAR).ok();
        let mut candidates = config.client_locations.clone();
        candidates.extend(program_files_candidate(program_files.as_deref()));
        Self::new(candidates, session)
    }

    /// Returns the searched locations.
    #[must_use]
    pub fn candidates(&self) -> &[Utf8PathBuf] {
        &self.candidates
    }

    /// Returns the client location, searching only when none is cached.
    #[must_use]
    pub fn locate(&self) -> Option<Utf8PathBuf> {
        if let Some(cached) = self.session.client_path() {
            return Some(cached);
        }
        let found = self
            .candidates
            .iter()
            .find(|candidate| file_exists(candidate))?;
        info!(path = %found, "native client located");
        self.session.set_client_path(found);
        Some(found.clone())
    }
}

/// Client location inside a Windows program files directory.
#[must_use]
pub fn program_files_candidate(program_files: Option<&str>) -> Option<Utf8PathBuf> {
    let root = program_files.filter(|root| !root.is_empty())?;
    Some(Utf8PathBuf::from(format!(
        "{root}\\regify client\\regify_client.exe"
    )))
}

/// Per-user regify data directory, with a trailing separator.
///
/// Windows roaming application data wins over the home directory; a
/// `\Local\` segment is redirected to `\Roaming\`.
#[must_use]
pub fn regify_home(app_data: Option<&str>, home: Option<&str>) -> Option<String> {
    if let Some(windows) = app_data.filter(|dir| !dir.is_empty()) {
        let roaming = replace_ignore_case(&format!("{windows}\\"), "\\local\\", "\\Roaming\\");
        debug!(home = %roaming, "using application data directory");
        return Some(format!("{roaming}regify\\"));
    }
    let unix = home.filter(|dir| !dir.is_empty())?;
    Some(format!("{unix}/.regify/"))
}

fn replace_ignore_case(text: &str, needle: &str, replacement: &str) -> String {
    let lowered = text.to_ascii_lowercase();
    let mut output = String::with_capacity(text.len());
    let mut consumed = 0;
    for (start, _) in lowered.match_indices(needle) {
        output.push_str(text.get(consumed..start).unwrap_or_default());
        output.push_str(replacement);
        consumed = start + needle.len();
    }
    output.push_str(text.get(consumed..).unwrap_or_default());
    output
}
