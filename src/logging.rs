// src/logging.rs

//! Diagnostics for the daemon.
//!
//! The level is picked from `--log-level`, else `FORGEWATCH_LOG`, else
//! `info`. Everything goes to stderr: stdout is shared with the build
//! command and carries only the banner lines.

use anyhow::{Result, anyhow};
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Environment variable read when `--log-level` is absent.
pub const LOG_ENV_VAR: &str = "FORGEWATCH_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let from_env = || std::env::var(LOG_ENV_VAR).ok().and_then(|s| parse_level_str(&s));
    let level = cli_level
        .map(Level::from)
        .or_else(from_env)
        .unwrap_or(Level::INFO);

    fmt()
        .with_max_level(level)
        .with_target(level >= Level::DEBUG)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

impl From<LogLevel> for Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Parse a level name as accepted in `FORGEWATCH_LOG`; case-insensitive.
pub fn parse_level_str(s: &str) -> Option<Level> {
    match s.trim().to_ascii_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
