//! Temporary workspace creation and result discovery.

use super::{Scratch, scratch};
use crate::native::TempWorkspace;
use rstest::rstest;

#[rstest]
fn first_workspace_is_numbered_one(scratch: Scratch) {
    let workspace = TempWorkspace::create(&scratch.root).expect("creates");

    assert_eq!(workspace.name(), "regify-1");
    assert_eq!(workspace.path(), scratch.root.join("regify-1"));
    assert!(workspace.path().is_dir());
}

#[rstest]
fn taken_numbers_are_skipped(scratch: Scratch) {
    std::fs::create_dir(scratch.root.join("regify-1")).expect("seed");
    std::fs::create_dir(scratch.root.join("regify-2")).expect("seed");

    let workspace = TempWorkspace::create(&scratch.root).expect("creates");
    let second = TempWorkspace::create(&scratch.root).expect("creates");

    assert_eq!(workspace.name(), "regify-3");
    assert_eq!(second.name(), "regify-4");
}

#[cfg(unix)]
#[rstest]
fn argument_path_ends_with_separator(scratch: Scratch) {
    let workspace = TempWorkspace::create(&scratch.root).expect("creates");

    assert_eq!(
        workspace.argument_path(),
        format!("{}/regify-1/", scratch.root)
    );
}

#[rstest]
fn finds_first_result_file_by_name(scratch: Scratch) {
    let workspace = TempWorkspace::create(&scratch.root).expect("creates");
    std::fs::write(workspace.path().join("notes.txt"), b"x").expect("seed");
    std::fs::write(workspace.path().join("b.rgf"), b"second").expect("seed");
    std::fs::write(workspace.path().join("a.rgf"), b"first").expect("seed");
    std::fs::create_dir(workspace.path().join("0.rgf")).expect("seed");

    let found = workspace.find_result().expect("lists");

    assert_eq!(found.as_deref(), Some("a.rgf"));
    assert_eq!(workspace.read("a.rgf").expect("reads"), b"first");
}

#[rstest]
fn empty_workspace_has_no_result(scratch: Scratch) {
    let workspace = TempWorkspace::create(&scratch.root).expect("creates");

    assert_eq!(workspace.find_result().expect("lists"), None);
}

#[rstest]
fn remove_deletes_the_directory(scratch: Scratch) {
    let workspace = TempWorkspace::create(&scratch.root).expect("creates");
    std::fs::write(workspace.path().join("a.rgf"), b"x").expect("seed");
    let path = workspace.path().to_owned();

    workspace.remove().expect("removes");

    assert!(!path.exists());
}

#[test]
fn missing_root_is_an_error() {
    let result = TempWorkspace::create(camino::Utf8Path::new("/nonexistent/regimail-root"));

    assert!(result.is_err());
}
