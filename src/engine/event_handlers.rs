// src/engine/event_handlers.rs

//! Event handling logic for the core loop.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::WatchConfig;
use crate::engine::debounce::DebounceGate;
use crate::filter::{is_noise, is_watched_extension};
use crate::types::{ChangeEvent, ChangeKind};

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Subscribe this newly created directory.
    EnrollDirectory(PathBuf),
    /// Terminate the current build (if any) and start `command`.
    RestartBuild { command: String },
}

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    pub fn continue_with(commands: Vec<CoreCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }

    pub fn stop() -> Self {
        Self {
            commands: Vec::new(),
            keep_running: false,
        }
    }
}

/// Handle one batch of change events.
///
/// For each event:
/// 1. events without a name (about the watched directory itself) are skipped;
/// 2. a created directory is always enrolled, whether or not it also
///    qualifies for a build;
/// 3. a non-directory entry goes through the noise filter, the extension
///    filter and the debounce gate, and restarts the build if accepted.
///
/// Other directory events never trigger a build.
pub fn handle_change_batch(
    config: &WatchConfig,
    gate: &mut DebounceGate,
    window: Duration,
    events: Vec<ChangeEvent>,
    now: Instant,
) -> CoreStep {
    let mut commands = Vec::new();

    for event in events {
        if event.name.is_empty() {
            continue;
        }
        debug!(dir = %event.affected_path.display(), name = %event.name, kind = ?event.kind, "Detected change");

        if event.is_new_directory() {
            commands.push(CoreCommand::EnrollDirectory(event.full_path()));
        }

        if event.is_directory || !qualifies_for_build(config, &event) {
            continue;
        }

        if gate.should_accept(now, window) {
            commands.push(CoreCommand::RestartBuild {
                command: config.build_command().to_string(),
            });
        }
    }

    CoreStep::continue_with(commands)
}

/// Filters applied to a file event before it may reach the debounce gate.
pub fn qualifies_for_build(config: &WatchConfig, event: &ChangeEvent) -> bool {
    if event.kind == ChangeKind::Other {
        return false;
    }
    if is_noise(&event.name) {
        debug!(name = %event.name, "Ignored temporary/cache file");
        return false;
    }
    is_watched_extension(&event.name, config.extensions())
}
