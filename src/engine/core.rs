// src/engine/core.rs

//! Pure core loop state machine.
//!
//! This module contains a synchronous, deterministic core that consumes
//! [`RuntimeEvent`]s together with the current monotonic time and produces:
//! - an updated debounce state
//! - a list of commands describing what the IO shell should do next
//!
//! The async shell (`engine::runtime::Runtime`) is responsible for reading
//! the runtime channel, enrolling directories, supervising the build and
//! running the shutdown sequence.
//!
//! The core is unit tested without Tokio, channels, filesystem, or processes.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::WatchConfig;
use crate::engine::RuntimeEvent;
use crate::engine::debounce::DebounceGate;
use crate::engine::event_handlers::{CoreCommand, CoreStep, handle_change_batch};

/// Pure core state: the immutable config plus the debounce gate.
#[derive(Debug)]
pub struct CoreLoop {
    config: WatchConfig,
    gate: DebounceGate,
    window: Duration,
}

impl CoreLoop {
    pub fn new(config: WatchConfig, window: Duration) -> Self {
        Self {
            config,
            gate: DebounceGate::new(),
            window,
        }
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    /// The build started right after enrollment. It goes through the gate like
    /// any other trigger, so it opens the first debounce window.
    pub fn initial_build(&mut self, now: Instant) -> CoreStep {
        let mut commands = Vec::new();
        if self.gate.should_accept(now, self.window) {
            commands.push(CoreCommand::RestartBuild {
                command: self.config.build_command().to_string(),
            });
        }
        CoreStep::continue_with(commands)
    }

    /// Handle a single runtime event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: RuntimeEvent, now: Instant) -> CoreStep {
        match event {
            RuntimeEvent::Changes(events) => {
                handle_change_batch(&self.config, &mut self.gate, self.window, events, now)
            }
            RuntimeEvent::BackendFailed(reason) => {
                warn!(%reason, "notification backend failed; stopping");
                CoreStep::stop()
            }
            RuntimeEvent::ShutdownRequested => {
                info!("shutdown requested");
                CoreStep::stop()
            }
        }
    }
}
