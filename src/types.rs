// src/types.rs

use std::path::PathBuf;

/// What happened to a directory entry, as reported by the notification backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
    /// Anything the backend could not classify. Never triggers a build.
    Other,
}

/// One change inside a watched directory.
///
/// `affected_path` is the watched directory the event was reported for and
/// `name` the entry inside it. `name` is empty for events about the watched
/// directory itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub affected_path: PathBuf,
    pub name: String,
    pub is_directory: bool,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(
        affected_path: impl Into<PathBuf>,
        name: impl Into<String>,
        is_directory: bool,
        kind: ChangeKind,
    ) -> Self {
        Self {
            affected_path: affected_path.into(),
            name: name.into(),
            is_directory,
            kind,
        }
    }

    /// Absolute path of the entry the event is about.
    pub fn full_path(&self) -> PathBuf {
        self.affected_path.join(&self.name)
    }

    pub fn is_new_directory(&self) -> bool {
        self.is_directory && self.kind == ChangeKind::Created
    }
}
