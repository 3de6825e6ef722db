// src/watch/mod.rs

//! Directory subscriptions and change notification.
//!
//! This module is responsible for:
//! - The notification capability ([`backend::NotifyBackend`]) and its
//!   `notify`-based implementation.
//! - The [`registry::WatchRegistry`], which walks directory trees and keeps one
//!   subscription per directory for the lifetime of the process.
//!
//! It does **not** decide whether a change should trigger a build; that is the
//! engine's job.

pub mod backend;
pub mod notify_backend;
pub mod path_utils;
pub mod registry;

pub use backend::{NotifyBackend, WatchHandle};
pub use notify_backend::NotifyWatcherBackend;
pub use registry::{EnrollResult, MAX_WATCHES, WatchRegistry};
