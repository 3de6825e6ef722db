use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use forgewatch::errors::{ForgewatchError, Result};
use forgewatch::watch::{NotifyBackend, WatchHandle};

#[derive(Debug, Default)]
struct State {
    subscribed: Vec<PathBuf>,
    unsubscribed: Vec<PathBuf>,
    failing: HashSet<PathBuf>,
    system_limit: Option<usize>,
    fail_unsubscribe: bool,
    next_id: u64,
}

/// A notification backend that:
/// - records every subscribe/unsubscribe call
/// - fails subscriptions for chosen directories
/// - optionally simulates an OS-wide watch limit
///
/// Clones share state, so a test can keep one as a probe after handing the
/// other to a registry.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<State>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn fail_on(&self, dir: impl Into<PathBuf>) {
        self.lock().failing.insert(dir.into());
    }

    pub fn with_system_limit(self, limit: usize) -> Self {
        self.lock().system_limit = Some(limit);
        self
    }

    pub fn fail_unsubscribe(&self) {
        self.lock().fail_unsubscribe = true;
    }

    /// Directories subscribed so far, in call order.
    pub fn subscribed(&self) -> Vec<PathBuf> {
        self.lock().subscribed.clone()
    }

    pub fn unsubscribed(&self) -> Vec<PathBuf> {
        self.lock().unsubscribed.clone()
    }

    pub fn is_subscribed(&self, dir: &Path) -> bool {
        let state = self.lock();
        state.subscribed.iter().any(|d| d == dir) && !state.unsubscribed.iter().any(|d| d == dir)
    }
}

impl NotifyBackend for FakeBackend {
    fn subscribe(&mut self, dir: &Path) -> Result<WatchHandle> {
        let mut state = self.lock();
        if state.failing.contains(dir) {
            return Err(ForgewatchError::Subscribe {
                path: dir.to_path_buf(),
                reason: "injected failure".to_string(),
            });
        }
        if let Some(limit) = state.system_limit {
            if state.subscribed.len() >= limit {
                return Err(ForgewatchError::WatchLimit("injected system limit".to_string()));
            }
        }
        state.next_id += 1;
        state.subscribed.push(dir.to_path_buf());
        Ok(WatchHandle::new(state.next_id, dir))
    }

    fn unsubscribe(&mut self, handle: &WatchHandle) -> Result<()> {
        let mut state = self.lock();
        state.unsubscribed.push(handle.path().to_path_buf());
        if state.fail_unsubscribe {
            return Err(ForgewatchError::Subscribe {
                path: handle.path().to_path_buf(),
                reason: "already gone".to_string(),
            });
        }
        Ok(())
    }
}
