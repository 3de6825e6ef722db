// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for running the build command through a shell
//! and guaranteeing that at most one instance of it is alive.
//!
//! - [`launcher`] provides the `ProcessLauncher` capability and the
//!   production `ShellLauncher` on top of `tokio::process::Command`; tests
//!   replace it with a fake.
//! - [`supervisor`] owns the single current child and implements
//!   terminate-then-start.
//! - [`nesting`] holds the environment marker that stops a supervised child
//!   from starting another forgewatch.

pub mod launcher;
pub mod nesting;
pub mod supervisor;

pub use launcher::{BoxFuture, ExitReport, ProcessLauncher, ShellLauncher};
pub use nesting::{NESTED_MARKER_VAR, ensure_not_nested};
pub use supervisor::{BuildSupervisor, SupervisorState};
