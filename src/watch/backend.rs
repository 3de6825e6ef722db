// src/watch/backend.rs

//! Pluggable notification backend abstraction.
//!
//! The registry talks to a `NotifyBackend` instead of a concrete OS watcher.
//! Production uses [`super::NotifyWatcherBackend`]; tests provide a fake that
//! records subscriptions and can inject failures. Change events do not flow
//! through this trait: backends push them into the runtime channel as
//! [`crate::engine::RuntimeEvent::Changes`] batches.

use std::path::{Path, PathBuf};

use crate::errors::Result;

/// Token for one active directory subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchHandle {
    id: u64,
    path: PathBuf,
}

impl WatchHandle {
    pub fn new(id: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            path: path.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Subscribe/unsubscribe capability for single directories (non-recursive).
pub trait NotifyBackend: Send {
    /// Start receiving Created/Modified/Deleted events for entries directly
    /// inside `dir`.
    ///
    /// Errors are per-directory; a backend-wide watch limit should be
    /// reported as [`crate::errors::ForgewatchError::WatchLimit`].
    fn subscribe(&mut self, dir: &Path) -> Result<WatchHandle>;

    /// Drop a subscription. May fail if the directory is already gone.
    fn unsubscribe(&mut self, handle: &WatchHandle) -> Result<()>;
}
