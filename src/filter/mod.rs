// src/filter/mod.rs

//! Filename predicates applied to change events before they can reach the
//! debounce gate.
//!
//! - [`noise`] rejects editor swap files, backups and dotfiles outright.
//! - [`extension`] restricts triggers to a configured set of extensions.
//!
//! Both are pure: no IO, no state.

pub mod extension;
pub mod noise;

pub use extension::{ExtensionAllowList, is_watched_extension};
pub use noise::is_noise;
