// src/config/mod.rs

//! Configuration loading and validation for forgewatch.
//!
//! Responsibilities:
//! - Define the data model (`model.rs`).
//! - Read the line-oriented `.forgewatchrc` and merge CLI fallbacks (`loader.rs`).
//! - Validate and resolve the result into a [`WatchConfig`] (`validate.rs`).
//! - Write a fresh rc file for `forgewatch init` (`wizard.rs`).

pub mod loader;
pub mod model;
pub mod validate;
pub mod wizard;

pub use loader::{DEFAULT_RC_FILE, load_and_validate, load_rc, parse_rc};
pub use model::{RawConfig, WatchConfig};
pub use wizard::{render_rc, run_wizard, write_rc};
