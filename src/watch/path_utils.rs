// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::{Path, PathBuf};

/// Split an absolute event path into its containing directory and entry name.
///
/// The name is converted lossily to UTF-8. A path without a final component
/// (e.g. `/`) yields itself with an empty name, which the engine treats as an
/// event on the watched directory itself.
pub fn split_entry(path: &Path) -> (PathBuf, String) {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => (parent.to_path_buf(), name.to_string_lossy().into_owned()),
        _ => (path.to_path_buf(), String::new()),
    }
}

/// Whether `path` is a directory, without following symlinks.
///
/// Deleted entries cannot be inspected and report `false`.
pub fn is_real_dir(path: &Path) -> bool {
    std::fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_dir())
        .unwrap_or(false)
}
