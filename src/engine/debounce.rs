// src/engine/debounce.rs

use std::time::{Duration, Instant};

/// Default minimum spacing between two accepted triggers.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(1000);

/// Leading-edge debounce.
///
/// The first trigger of a burst is accepted and opens a window; every trigger
/// inside that window is swallowed without extending it.
#[derive(Debug, Clone, Default)]
pub struct DebounceGate {
    last_accepted_at: Option<Instant>,
}

impl DebounceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept the trigger at `now` unless the last accepted one is less than
    /// `window` ago. Only acceptance updates the gate.
    pub fn should_accept(&mut self, now: Instant, window: Duration) -> bool {
        if let Some(last) = self.last_accepted_at {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < window {
                tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "Debounce: skipping build");
                return false;
            }
        }

        self.last_accepted_at = Some(now);
        true
    }

    pub fn last_accepted_at(&self) -> Option<Instant> {
        self.last_accepted_at
    }
}
