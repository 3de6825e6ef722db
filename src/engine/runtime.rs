// src/engine/runtime.rs

use std::fmt;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::{ForgewatchError, Result};
use crate::exec::{BuildSupervisor, ProcessLauncher};
use crate::types::ChangeEvent;
use crate::watch::{NotifyBackend, WatchRegistry};

use super::core::CoreLoop;
use super::{CoreCommand, RuntimeEvent, RuntimeOptions};

/// The event loop.
///
/// A thin IO shell around [`CoreLoop`]: it reads `RuntimeEvent`s, asks the
/// core what to do, and carries that out against the watch registry and the
/// build supervisor. Everything runs on one task; the only suspension points
/// are reading the channel and reaping a terminated build.
pub struct Runtime<B: NotifyBackend, L: ProcessLauncher> {
    core: CoreLoop,
    registry: WatchRegistry<B>,
    supervisor: BuildSupervisor<L>,
    event_rx: mpsc::UnboundedReceiver<RuntimeEvent>,
    options: RuntimeOptions,
}

impl<B: NotifyBackend, L: ProcessLauncher> fmt::Debug for Runtime<B, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("registry", &self.registry)
            .field("supervisor", &self.supervisor)
            .finish_non_exhaustive()
    }
}

impl<B: NotifyBackend, L: ProcessLauncher> Runtime<B, L> {
    pub fn new(
        core: CoreLoop,
        registry: WatchRegistry<B>,
        supervisor: BuildSupervisor<L>,
        event_rx: mpsc::UnboundedReceiver<RuntimeEvent>,
        options: RuntimeOptions,
    ) -> Self {
        Self {
            core,
            registry,
            supervisor,
            event_rx,
            options,
        }
    }

    /// Enroll every root, optionally start the first build, then process
    /// events until shutdown or backend failure.
    ///
    /// The shutdown sequence (stop the build, release all watches) always
    /// runs. A backend failure is returned as an error afterwards.
    pub async fn run(mut self) -> Result<()> {
        info!("forgewatch runtime started");

        let roots = self.core.config().roots().to_vec();
        for root in &roots {
            let result = self.registry.enroll_tree(root);
            if result.enrolled == 0 && result.already_watched == 0 {
                warn!(root = %root.display(), "no directory under this root could be watched");
            }
        }

        if self.options.build_on_start {
            let step = self.core.initial_build(Instant::now());
            for command in step.commands {
                self.execute_command(command).await;
            }
        }

        let outcome = self.event_loop().await;
        self.shutdown().await;

        info!("runtime exiting");
        outcome
    }

    async fn event_loop(&mut self) -> Result<()> {
        loop {
            let mut event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    return Err(ForgewatchError::NotificationChannel(
                        "runtime event channel closed".to_string(),
                    ));
                }
            };

            if let RuntimeEvent::Changes(events) = &mut event {
                self.mark_watched_directories(events);
            }
            debug!(?event, "runtime received event");

            let failure = match &event {
                RuntimeEvent::BackendFailed(reason) => Some(reason.clone()),
                _ => None,
            };

            // Feed the event into the pure core and get commands back.
            let step = self.core.step(event, Instant::now());

            for command in step.commands {
                self.execute_command(command).await;
            }

            if !step.keep_running {
                return match failure {
                    Some(reason) => Err(ForgewatchError::NotificationChannel(reason)),
                    None => Ok(()),
                };
            }
        }
    }

    /// A renamed-away entry cannot be inspected on disk, so the backend
    /// reports it as a file. Any entry the registry watches is a directory.
    fn mark_watched_directories(&self, events: &mut [ChangeEvent]) {
        for event in events.iter_mut() {
            if !event.is_directory
                && !event.name.is_empty()
                && self.registry.is_watched(&event.full_path())
            {
                event.is_directory = true;
            }
        }
    }

    /// Execute a single command from the core.
    async fn execute_command(&mut self, command: CoreCommand) {
        match command {
            CoreCommand::EnrollDirectory(dir) => {
                if self.registry.enroll_single(&dir) {
                    debug!(dir = %dir.display(), "enrolled new directory");
                }
            }
            CoreCommand::RestartBuild { command } => {
                self.supervisor.restart(&command).await;
            }
        }
    }

    async fn shutdown(&mut self) {
        self.supervisor.shutdown().await;
        self.registry.release_all();
    }
}
