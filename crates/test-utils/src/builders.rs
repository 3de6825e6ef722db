#![allow(dead_code)]

use std::path::{Path, PathBuf};

use forgewatch::config::WatchConfig;
use forgewatch::filter::ExtensionAllowList;
use forgewatch::types::{ChangeEvent, ChangeKind};

/// Builder for `WatchConfig` to simplify test setup.
pub struct WatchConfigBuilder {
    roots: Vec<PathBuf>,
    build: String,
    extensions: Option<ExtensionAllowList>,
}

impl WatchConfigBuilder {
    pub fn new(build: &str) -> Self {
        Self {
            roots: Vec::new(),
            build: build.to_string(),
            extensions: None,
        }
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn extensions(mut self, raw: &str) -> Self {
        self.extensions = Some(ExtensionAllowList::parse(raw));
        self
    }

    pub fn build(self) -> WatchConfig {
        WatchConfig::new_unchecked(self.roots, self.build, self.extensions)
    }
}

pub fn file_created(dir: impl AsRef<Path>, name: &str) -> ChangeEvent {
    ChangeEvent::new(dir.as_ref(), name, false, ChangeKind::Created)
}

pub fn file_modified(dir: impl AsRef<Path>, name: &str) -> ChangeEvent {
    ChangeEvent::new(dir.as_ref(), name, false, ChangeKind::Modified)
}

pub fn file_deleted(dir: impl AsRef<Path>, name: &str) -> ChangeEvent {
    ChangeEvent::new(dir.as_ref(), name, false, ChangeKind::Deleted)
}

pub fn dir_created(dir: impl AsRef<Path>, name: &str) -> ChangeEvent {
    ChangeEvent::new(dir.as_ref(), name, true, ChangeKind::Created)
}

pub fn dir_deleted(dir: impl AsRef<Path>, name: &str) -> ChangeEvent {
    ChangeEvent::new(dir.as_ref(), name, true, ChangeKind::Deleted)
}
