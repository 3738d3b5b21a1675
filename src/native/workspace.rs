//! Temporary directories the native client writes its results into.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use tracing::debug;

/// Name prefix of every workspace directory.
pub const WORKSPACE_PREFIX: &str = "regify-";

/// Extension of the files the client produces.
pub const RESULT_EXTENSION: &str = "rgf";

/// Upper bound on workspace numbers tried before giving up.
const MAX_WORKSPACES: u32 = 10_000;

/// A freshly created `regify-N` directory.
#[derive(Debug)]
pub struct TempWorkspace {
    root: Dir,
    name: String,
    path: Utf8PathBuf,
    dir: Dir,
}

impl TempWorkspace {
    /// Creates the first free `regify-N` directory (N ≥ 1) under `root`.
    ///
    /// # Errors
    ///
    /// Returns the I/O failure when `root` cannot be opened or no
    /// directory can be created.
    pub fn create(root: &Utf8Path) -> io::Result<Self> {
        let parent = Dir::open_ambient_dir(root, ambient_authority())?;
        for index in 1..=MAX_WORKSPACES {
            let name = format!("{WORKSPACE_PREFIX}{index}");
            match parent.create_dir(&name) {
                Ok(()) => {
                    let dir = parent.open_dir(&name)?;
                    let path = root.join(&name);
                    debug!(%path, "workspace created");
                    return Ok(Self {
                        root: parent,
                        name,
                        path,
                        dir,
                    });
                }
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {}
                Err(err) => return Err(err),
            }
        }
        Err(io::Error::other(format!(
            "no free workspace name under {root}"
        )))
    }

    /// Directory name, e.g. `regify-3`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path of the workspace.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Path with a trailing separator, as handed to the client.
    #[must_use]
    pub fn argument_path(&self) -> String {
        format!("{}{}", self.path, std::path::MAIN_SEPARATOR)
    }

    /// Returns the name of the first `.rgf` file, in name order.
    ///
    /// # Errors
    ///
    /// Returns the I/O failure raised while listing the directory.
    pub fn find_result(&self) -> io::Result<Option<String>> {
        let mut found = Vec::new();
        for item in self.dir.entries()? {
            let entry = item?;
            let name = entry.file_name()?;
            let is_result = Utf8Path::new(&name)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(RESULT_EXTENSION));
            if is_result && entry.file_type()?.is_file() {
                found.push(name);
            }
        }
        Ok(found.into_iter().min())
    }

    /// Reads a file of the workspace.
    ///
    /// # Errors
    ///
    /// Returns the I/O failure when the file cannot be read.
    pub fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        self.dir.read(name)
    }

    /// Deletes the workspace and everything in it.
    ///
    /// # Errors
    ///
    /// Returns the I/O failure when removal fails.
    pub fn remove(self) -> io::Result<()> {
        let Self { root, name, dir, .. } = self;
        drop(dir);
        root.remove_dir_all(&name)
    }
}
