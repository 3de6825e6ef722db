// src/engine/mod.rs

//! Event loop for forgewatch.
//!
//! This module ties together:
//! - the debounce gate (burst coalescing)
//! - event classification (noise/extension filters, new directories)
//! - the runtime loop that reacts to:
//!   - change batches from the notification backend
//!   - backend failures
//!   - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use crate::types::ChangeEvent;

/// Events flowing into the runtime from the backend and the signal listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// A batch of changes reported by the notification backend.
    Changes(Vec<ChangeEvent>),
    /// The notification channel broke; no further changes can be observed.
    BackendFailed(String),
    /// Graceful shutdown requested (Ctrl-C / SIGTERM).
    ShutdownRequested,
}

/// Runtime options for the async shell.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// Start one build right after the watches are established.
    pub build_on_start: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            build_on_start: true,
        }
    }
}

pub mod core;
pub mod debounce;
pub mod event_handlers;
pub mod runtime;

pub use self::core::CoreLoop;
pub use debounce::{DEBOUNCE_WINDOW, DebounceGate};
pub use event_handlers::{CoreCommand, CoreStep};
pub use runtime::Runtime;
