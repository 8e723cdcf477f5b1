//! Shared helpers for mockfs integration tests

use std::fs;
use std::path::Path;

/// Creates a handler file (and its parent directories) under `root`
pub fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, "export default () => {}\n").unwrap();
}

/// Creates a temporary handler tree with the given files
pub fn handler_tree(files: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for file in files {
        touch(dir.path(), file);
    }
    dir
}
