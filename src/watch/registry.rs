// src/watch/registry.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::ForgewatchError;
use crate::fs::FileSystem;
use crate::watch::backend::{NotifyBackend, WatchHandle};

/// Default cap on the number of subscribed directories.
pub const MAX_WATCHES: usize = 1024;

/// Summary of one [`WatchRegistry::enroll_tree`] walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollResult {
    /// Directories newly subscribed by this walk.
    pub enrolled: usize,
    /// Directories that were already in the registry.
    pub already_watched: usize,
    /// Directories the backend refused; their subtrees were not visited.
    pub failed: Vec<PathBuf>,
    /// Directories skipped because the watch limit was reached.
    pub refused: Vec<PathBuf>,
}

enum Enrollment {
    Subscribed,
    AlreadyWatched,
    Failed,
    Refused,
}

/// Owns every directory subscription for the lifetime of the process.
///
/// The registry only grows: deleted directories keep their (now silent)
/// handles until [`WatchRegistry::release_all`] runs at shutdown.
pub struct WatchRegistry<B: NotifyBackend> {
    backend: B,
    fs: Arc<dyn FileSystem>,
    handles: HashMap<PathBuf, WatchHandle>,
    max_watches: usize,
}

impl<B: NotifyBackend> std::fmt::Debug for WatchRegistry<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchRegistry")
            .field("watched", &self.handles.len())
            .field("max_watches", &self.max_watches)
            .finish_non_exhaustive()
    }
}

impl<B: NotifyBackend> WatchRegistry<B> {
    pub fn new(backend: B, fs: Arc<dyn FileSystem>, max_watches: usize) -> Self {
        Self {
            backend,
            fs,
            handles: HashMap::new(),
            max_watches,
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn is_watched(&self, dir: &Path) -> bool {
        self.handles.contains_key(dir)
    }

    /// Subscribe `root` and every directory below it.
    ///
    /// Symlinks are not followed. A directory the backend rejects is skipped
    /// together with its subtree; the walk carries on with its siblings.
    pub fn enroll_tree(&mut self, root: &Path) -> EnrollResult {
        let mut result = EnrollResult::default();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            match self.enroll_one(&dir) {
                Enrollment::Subscribed => result.enrolled += 1,
                Enrollment::AlreadyWatched => result.already_watched += 1,
                Enrollment::Failed => {
                    result.failed.push(dir);
                    continue;
                }
                Enrollment::Refused => {
                    result.refused.push(dir);
                    continue;
                }
            }

            match self.fs.subdirectories(&dir) {
                Ok(mut children) => {
                    // Reverse-sorted so the stack pops in name order.
                    children.sort_unstable_by(|a, b| b.cmp(a));
                    pending.extend(children);
                }
                Err(err) => {
                    warn!(dir = %dir.display(), error = %err, "cannot list directory; subdirectories not watched");
                }
            }
        }

        info!(
            root = %root.display(),
            enrolled = result.enrolled,
            failed = result.failed.len(),
            refused = result.refused.len(),
            "enrolled directory tree"
        );
        result
    }

    /// Subscribe exactly one directory (used for newly created ones).
    ///
    /// Returns `true` if the directory is watched afterwards.
    pub fn enroll_single(&mut self, dir: &Path) -> bool {
        matches!(
            self.enroll_one(dir),
            Enrollment::Subscribed | Enrollment::AlreadyWatched
        )
    }

    fn enroll_one(&mut self, dir: &Path) -> Enrollment {
        if self.handles.contains_key(dir) {
            debug!(dir = %dir.display(), "already watching");
            return Enrollment::AlreadyWatched;
        }

        if self.handles.len() >= self.max_watches {
            warn!(
                dir = %dir.display(),
                limit = self.max_watches,
                "Too many watches; directory not watched"
            );
            return Enrollment::Refused;
        }

        match self.backend.subscribe(dir) {
            Ok(handle) => {
                debug!(dir = %dir.display(), id = handle.id(), "Watching");
                self.handles.insert(dir.to_path_buf(), handle);
                Enrollment::Subscribed
            }
            Err(ForgewatchError::WatchLimit(reason)) => {
                warn!(dir = %dir.display(), %reason, "Too many watches; directory not watched");
                Enrollment::Refused
            }
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "failed to watch directory");
                Enrollment::Failed
            }
        }
    }

    /// Drop every subscription. Errors are logged and ignored; calling this
    /// again is a no-op.
    pub fn release_all(&mut self) {
        let handles = std::mem::take(&mut self.handles);
        let count = handles.len();

        for (dir, handle) in handles {
            if let Err(err) = self.backend.unsubscribe(&handle) {
                debug!(dir = %dir.display(), error = %err, "ignoring unsubscribe failure");
            }
        }

        if count > 0 {
            info!(count, "released all watches");
        }
    }
}
