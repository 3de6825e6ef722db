// src/exec/supervisor.rs

//! Single-child build supervision.

use tracing::{debug, error, info, warn};

use crate::exec::launcher::{ExitReport, ProcessLauncher};

/// Lifecycle of the supervised build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    /// No child.
    Idle,
    /// A child was started and has not been reaped by us yet.
    Running,
    /// Termination signal sent, waiting for the child to be reaped.
    Terminating,
}

/// Owns at most one running build process.
///
/// [`BuildSupervisor::restart`] is terminate-then-start: it does not return
/// from the termination half until the previous child is reaped, so two
/// builds never overlap. After [`BuildSupervisor::shutdown`] no further
/// builds are started.
pub struct BuildSupervisor<L: ProcessLauncher> {
    launcher: L,
    current: Option<L::Child>,
    state: SupervisorState,
    shut_down: bool,
}

impl<L: ProcessLauncher> std::fmt::Debug for BuildSupervisor<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildSupervisor")
            .field("state", &self.state)
            .field("shut_down", &self.shut_down)
            .finish_non_exhaustive()
    }
}

impl<L: ProcessLauncher> BuildSupervisor<L> {
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            current: None,
            state: SupervisorState::Idle,
            shut_down: false,
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    pub fn has_child(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Terminate and reap the current build (if any), then start `command`.
    ///
    /// A start failure is logged and leaves the supervisor idle; the next
    /// accepted trigger tries again.
    pub async fn restart(&mut self, command: &str) {
        if self.shut_down {
            warn!("supervisor is shut down; not starting a new build");
            return;
        }

        self.stop_current().await;

        match self.launcher.start(command) {
            Ok(child) => {
                let pid = self.launcher.child_id(&child);
                info!(?pid, cmd = %command, "Started build process");
                self.current = Some(child);
                self.state = SupervisorState::Running;
            }
            Err(err) => {
                error!(cmd = %command, error = %err, "failed to start build process");
                self.state = SupervisorState::Idle;
            }
        }
    }

    /// Terminate and reap the current build and refuse further starts.
    ///
    /// Calling this more than once is a no-op.
    pub async fn shutdown(&mut self) {
        if self.shut_down {
            debug!("supervisor already shut down");
            return;
        }
        self.shut_down = true;
        self.stop_current().await;
    }

    async fn stop_current(&mut self) {
        let Some(mut child) = self.current.take() else {
            return;
        };
        let pid = self.launcher.child_id(&child);

        // A child that finished on its own is only reported, never signalled:
        // its pid may already belong to someone else.
        match self.launcher.try_status(&mut child) {
            Ok(Some(report)) => {
                report_previous_exit(pid, report);
                self.state = SupervisorState::Idle;
                return;
            }
            Ok(None) => {}
            Err(err) => debug!(?pid, error = %err, "could not poll build process"),
        }

        self.state = SupervisorState::Terminating;
        debug!(?pid, "Killing process");
        if let Err(err) = self.launcher.terminate(&mut child) {
            debug!(?pid, error = %err, "termination signal failed; process may have exited");
        }

        match self.launcher.wait(child).await {
            Ok(report) => debug!(?pid, code = ?report.code, "Process terminated"),
            Err(err) => warn!(?pid, error = %err, "failed to reap build process"),
        }
        self.state = SupervisorState::Idle;
    }
}

fn report_previous_exit(pid: Option<u32>, report: ExitReport) {
    if report.success {
        info!(?pid, "previous build finished successfully");
    } else {
        warn!(?pid, exit_code = ?report.code, "previous build exited unsuccessfully");
    }
}
