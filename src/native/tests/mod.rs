//! Unit tests for the native client module.

mod workspace_tests;

use camino::Utf8PathBuf;
use rstest::fixture;
use tempfile::TempDir;

/// A temporary directory with a UTF-8 path.
pub(super) struct Scratch {
    _dir: TempDir,
    pub root: Utf8PathBuf,
}

impl Scratch {
    /// Creates an empty file below the scratch root and returns its path.
    pub fn touch(&self, name: &str) -> Utf8PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, b"").expect("create file");
        path
    }
}

#[fixture]
pub(super) fn scratch() -> Scratch {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
    Scratch { _dir: dir, root }
}
