// src/watch/notify_backend.rs

use std::path::Path;

use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::engine::RuntimeEvent;
use crate::errors::{ForgewatchError, Result};
use crate::types::{ChangeEvent, ChangeKind};
use crate::watch::backend::{NotifyBackend, WatchHandle};
use crate::watch::path_utils::{is_real_dir, split_entry};

/// Notification backend on top of `notify`'s platform watcher.
///
/// Every directory is watched non-recursively; recursion is the registry's
/// job. The notify callback runs on notify's own thread and forwards each
/// translated batch into the runtime channel.
pub struct NotifyWatcherBackend {
    watcher: RecommendedWatcher,
    next_id: u64,
}

impl std::fmt::Debug for NotifyWatcherBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyWatcherBackend")
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl NotifyWatcherBackend {
    /// Create the platform watcher. Failure here is fatal for the daemon.
    pub fn new(runtime_tx: mpsc::UnboundedSender<RuntimeEvent>) -> Result<Self> {
        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.need_rescan() {
                        warn!("notification queue overflowed; some changes may have been missed");
                    }
                    let batch = translate_event(&event);
                    if batch.is_empty() {
                        return;
                    }
                    if let Err(err) = runtime_tx.send(RuntimeEvent::Changes(batch)) {
                        debug!("runtime gone; dropping change batch: {err}");
                    }
                }
                Err(err) => {
                    let _ = runtime_tx.send(RuntimeEvent::BackendFailed(err.to_string()));
                }
            },
            Config::default(),
        )
        .map_err(|e| ForgewatchError::NotificationChannel(e.to_string()))?;

        Ok(Self {
            watcher,
            next_id: 0,
        })
    }
}

impl NotifyBackend for NotifyWatcherBackend {
    fn subscribe(&mut self, dir: &Path) -> Result<WatchHandle> {
        self.watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|err| map_watch_error(dir, err))?;
        self.next_id += 1;
        Ok(WatchHandle::new(self.next_id, dir))
    }

    fn unsubscribe(&mut self, handle: &WatchHandle) -> Result<()> {
        self.watcher
            .unwatch(handle.path())
            .map_err(|err| map_watch_error(handle.path(), err))
    }
}

fn map_watch_error(dir: &Path, err: notify::Error) -> ForgewatchError {
    match err.kind {
        notify::ErrorKind::MaxFilesWatch => {
            ForgewatchError::WatchLimit("system limit on watched directories reached".to_string())
        }
        _ => ForgewatchError::Subscribe {
            path: dir.to_path_buf(),
            reason: err.to_string(),
        },
    }
}

/// Translate one notify event into per-path [`ChangeEvent`]s.
///
/// Access events are not part of the subscribed set and produce nothing.
/// The source side of a rename is gone from disk and is reported as a file;
/// the runtime corrects that for directories it watches.
pub fn translate_event(event: &Event) -> Vec<ChangeEvent> {
    // (kind, directory hint) per path; `None` hint means "look at the disk".
    let classify = |index: usize| -> Option<(ChangeKind, Option<bool>)> {
        match event.kind {
            EventKind::Access(_) => None,
            EventKind::Create(kind) => Some((ChangeKind::Created, create_dir_hint(kind))),
            EventKind::Remove(kind) => Some((ChangeKind::Deleted, remove_dir_hint(kind))),
            EventKind::Modify(ModifyKind::Name(mode)) => match mode {
                RenameMode::From => Some((ChangeKind::Deleted, Some(false))),
                RenameMode::To => Some((ChangeKind::Created, None)),
                RenameMode::Both if index == 0 => Some((ChangeKind::Deleted, Some(false))),
                RenameMode::Both => Some((ChangeKind::Created, None)),
                _ => Some((ChangeKind::Modified, None)),
            },
            EventKind::Modify(_) => Some((ChangeKind::Modified, None)),
            EventKind::Any | EventKind::Other => Some((ChangeKind::Other, None)),
        }
    };

    event
        .paths
        .iter()
        .enumerate()
        .filter_map(|(index, path)| {
            let (kind, dir_hint) = classify(index)?;
            let (affected_path, name) = split_entry(path);
            let is_directory = dir_hint.unwrap_or_else(|| is_real_dir(path));
            Some(ChangeEvent {
                affected_path,
                name,
                is_directory,
                kind,
            })
        })
        .collect()
}

fn create_dir_hint(kind: CreateKind) -> Option<bool> {
    match kind {
        CreateKind::Folder => Some(true),
        CreateKind::File => Some(false),
        _ => None,
    }
}

fn remove_dir_hint(kind: RemoveKind) -> Option<bool> {
    match kind {
        RemoveKind::Folder => Some(true),
        RemoveKind::File => Some(false),
        // Nothing left on disk to inspect.
        _ => Some(false),
    }
}
