// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForgewatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to watch {path:?}: {reason}")]
    Subscribe { path: PathBuf, reason: String },

    #[error("Too many watches: {0}")]
    WatchLimit(String),

    #[error("failed to start build command '{command}': {reason}")]
    Spawn { command: String, reason: String },

    #[error("Refused to start: already running inside forgewatch.")]
    NestedInstance,

    #[error("notification channel failed: {0}")]
    NotificationChannel(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ForgewatchError>;
