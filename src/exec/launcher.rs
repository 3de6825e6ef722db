// src/exec/launcher.rs

//! Pluggable child-process capability.
//!
//! The supervisor never touches OS process APIs directly; it goes through a
//! `ProcessLauncher`. `ShellLauncher` is the production implementation, tests
//! provide one that records calls without spawning anything.

use std::future::Future;
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};
use tracing::debug;

use crate::errors::{ForgewatchError, Result};
use crate::exec::nesting::{NESTED_MARKER_VALUE, NESTED_MARKER_VAR};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitReport {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub success: bool,
}

impl ExitReport {
    pub fn from_code(code: i32) -> Self {
        Self {
            code: Some(code),
            success: code == 0,
        }
    }

    pub fn signalled() -> Self {
        Self {
            code: None,
            success: false,
        }
    }
}

impl From<ExitStatus> for ExitReport {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
            success: status.success(),
        }
    }
}

/// Start / terminate / reap capability for build processes.
pub trait ProcessLauncher: Send {
    type Child: Send + 'static;

    /// Start `command` through a shell.
    fn start(&mut self, command: &str) -> Result<Self::Child>;

    /// OS process id, for logging.
    fn child_id(&self, child: &Self::Child) -> Option<u32>;

    /// Non-blocking check: `Some` if the child has already exited (and is
    /// now reaped).
    fn try_status(&mut self, child: &mut Self::Child) -> Result<Option<ExitReport>>;

    /// Ask the child (and its process group) to terminate.
    fn terminate(&mut self, child: &mut Self::Child) -> Result<()>;

    /// Wait until the child has exited and been reaped.
    fn wait(&mut self, child: Self::Child) -> BoxFuture<'_, Result<ExitReport>>;
}

/// Runs build commands with `sh -c` (`cmd /C` on Windows).
///
/// Each child gets its own process group so that termination reaches every
/// process the shell started. stdout/stderr are inherited; stdin is closed
/// because a background process group cannot read the terminal.
#[derive(Debug, Clone, Default)]
pub struct ShellLauncher;

impl ShellLauncher {
    pub fn new() -> Self {
        Self
    }

    fn shell_command(command: &str) -> Command {
        let mut std_cmd = if cfg!(windows) {
            let mut c = std::process::Command::new("cmd");
            c.arg("/C").arg(command);
            c
        } else {
            let mut c = std::process::Command::new("sh");
            c.arg("-c").arg(command);
            c
        };

        std_cmd
            .env(NESTED_MARKER_VAR, NESTED_MARKER_VALUE)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            std_cmd.process_group(0);
        }

        let mut cmd = Command::from(std_cmd);
        cmd.kill_on_drop(true);
        cmd
    }
}

impl ProcessLauncher for ShellLauncher {
    type Child = Child;

    fn start(&mut self, command: &str) -> Result<Child> {
        Self::shell_command(command)
            .spawn()
            .map_err(|err| ForgewatchError::Spawn {
                command: command.to_string(),
                reason: err.to_string(),
            })
    }

    fn child_id(&self, child: &Child) -> Option<u32> {
        child.id()
    }

    fn try_status(&mut self, child: &mut Child) -> Result<Option<ExitReport>> {
        Ok(child.try_wait()?.map(ExitReport::from))
    }

    #[cfg(unix)]
    fn terminate(&mut self, child: &mut Child) -> Result<()> {
        // `id()` is `None` once tokio has reaped the child.
        let Some(pid) = child.id() else {
            return Ok(());
        };

        // The child leads its own group (process_group(0)), so pgid == pid.
        let pgid = pid as libc::pid_t;
        let rc = unsafe { libc::kill(-pgid, libc::SIGTERM) };
        if rc == 0 {
            // A group stopped by job control (SIGTTOU/SIGTTIN) only acts on
            // the SIGTERM once it is continued.
            unsafe { libc::kill(-pgid, libc::SIGCONT) };
            return Ok(());
        }

        let err = std::io::Error::last_os_error();
        if err.raw_os_error() == Some(libc::ESRCH) {
            debug!(pid, "process group already gone");
            Ok(())
        } else {
            Err(err.into())
        }
    }

    #[cfg(not(unix))]
    fn terminate(&mut self, child: &mut Child) -> Result<()> {
        match child.start_kill() {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::InvalidInput => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn wait(&mut self, mut child: Child) -> BoxFuture<'_, Result<ExitReport>> {
        Box::pin(async move {
            let status = child.wait().await?;
            Ok(ExitReport::from(status))
        })
    }
}
