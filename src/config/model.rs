// src/config/model.rs

use std::path::PathBuf;

use crate::filter::ExtensionAllowList;

/// Configuration values as read from the rc file and/or the command line,
/// before any path resolution or validation.
///
/// Mirrors a `.forgewatchrc` such as:
///
/// ```text
/// path=src include
/// build=make && ./app
/// extensions=.c .h
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    /// Directories to watch, as written (relative paths allowed).
    pub paths: Vec<String>,

    /// Shell command to run on every accepted change.
    pub build: Option<String>,

    /// Raw whitespace-separated extension list.
    pub extensions: Option<String>,
}

impl RawConfig {
    /// Fill fields missing here from `fallback` (used for CLI positionals).
    pub fn or_fallback(mut self, fallback: RawConfig) -> Self {
        if self.paths.is_empty() {
            self.paths = fallback.paths;
        }
        if self.build.is_none() {
            self.build = fallback.build;
        }
        if self.extensions.is_none() {
            self.extensions = fallback.extensions;
        }
        self
    }
}

/// Validated, immutable configuration handed to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    roots: Vec<PathBuf>,
    build_command: String,
    extensions: Option<ExtensionAllowList>,
}

impl WatchConfig {
    /// Build a config without checking the paths on disk.
    ///
    /// Production code goes through [`RawConfig::resolve`]; this exists for
    /// tests and callers that already validated their inputs.
    pub fn new_unchecked(
        roots: Vec<PathBuf>,
        build_command: impl Into<String>,
        extensions: Option<ExtensionAllowList>,
    ) -> Self {
        Self {
            roots,
            build_command: build_command.into(),
            extensions: extensions.filter(|list| !list.is_empty()),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn build_command(&self) -> &str {
        &self.build_command
    }

    /// `None` when every extension is watched.
    pub fn extensions(&self) -> Option<&ExtensionAllowList> {
        self.extensions.as_ref()
    }
}
