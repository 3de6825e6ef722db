use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use forgewatch::errors::{ForgewatchError, Result};
use forgewatch::exec::{BoxFuture, ExitReport, ProcessLauncher};

#[derive(Debug, Default)]
struct State {
    started: Vec<String>,
    terminated: Vec<u64>,
    reaped: Vec<u64>,
    live: HashSet<u64>,
    max_live: usize,
    exited: HashMap<u64, ExitReport>,
    fail_starts: usize,
    next_id: u64,
}

/// Handle for a fake child process.
#[derive(Debug)]
pub struct FakeChild {
    pub id: u64,
}

/// A process launcher that never spawns anything.
///
/// It tracks how many children are "live" (started and not yet reaped) and
/// the maximum ever observed, so tests can check the single-child invariant.
#[derive(Debug, Clone, Default)]
pub struct FakeLauncher {
    state: Arc<Mutex<State>>,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Make the next `n` starts fail.
    pub fn fail_next_starts(&self, n: usize) {
        self.lock().fail_starts = n;
    }

    /// Pretend child `id` exited on its own with `code`.
    pub fn exit_child(&self, id: u64, code: i32) {
        let mut state = self.lock();
        state.exited.insert(id, ExitReport::from_code(code));
    }

    /// Commands started, in order.
    pub fn started(&self) -> Vec<String> {
        self.lock().started.clone()
    }

    pub fn start_count(&self) -> usize {
        self.lock().started.len()
    }

    /// Ids that received a termination request.
    pub fn terminated(&self) -> Vec<u64> {
        self.lock().terminated.clone()
    }

    pub fn reaped(&self) -> Vec<u64> {
        self.lock().reaped.clone()
    }

    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    pub fn max_live(&self) -> usize {
        self.lock().max_live
    }

    /// Id of the most recently started child.
    pub fn last_id(&self) -> Option<u64> {
        let state = self.lock();
        (state.next_id > 0).then_some(state.next_id)
    }
}

impl ProcessLauncher for FakeLauncher {
    type Child = FakeChild;

    fn start(&mut self, command: &str) -> Result<FakeChild> {
        let mut state = self.lock();
        if state.fail_starts > 0 {
            state.fail_starts -= 1;
            return Err(ForgewatchError::Spawn {
                command: command.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        state.next_id += 1;
        let id = state.next_id;
        state.started.push(command.to_string());
        state.live.insert(id);
        state.max_live = state.max_live.max(state.live.len());
        Ok(FakeChild { id })
    }

    fn child_id(&self, child: &FakeChild) -> Option<u32> {
        Some(child.id as u32)
    }

    fn try_status(&mut self, child: &mut FakeChild) -> Result<Option<ExitReport>> {
        let mut state = self.lock();
        match state.exited.get(&child.id).copied() {
            Some(report) => {
                state.live.remove(&child.id);
                state.reaped.push(child.id);
                Ok(Some(report))
            }
            None => Ok(None),
        }
    }

    fn terminate(&mut self, child: &mut FakeChild) -> Result<()> {
        let mut state = self.lock();
        state.terminated.push(child.id);
        state.exited.entry(child.id).or_insert_with(ExitReport::signalled);
        Ok(())
    }

    fn wait(&mut self, child: FakeChild) -> BoxFuture<'_, Result<ExitReport>> {
        let state = Arc::clone(&self.state);
        Box::pin(async move {
            // Yield once so the reap really is an await point.
            tokio::task::yield_now().await;
            let mut state = state.lock().unwrap();
            state.live.remove(&child.id);
            state.reaped.push(child.id);
            Ok(state
                .exited
                .get(&child.id)
                .copied()
                .unwrap_or_else(ExitReport::signalled))
        })
    }
}
