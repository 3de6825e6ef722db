// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::RawConfig;

/// Command-line arguments for `forgewatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "forgewatch",
    version,
    about = "Re-run a build command whenever watched sources change.",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    /// Directory to watch, or a quoted whitespace-separated list.
    ///
    /// Used only when the rc file does not set `path=`.
    #[arg(value_name = "WATCH_DIR")]
    pub watch_dir: Option<String>,

    /// Shell command to run on every change.
    ///
    /// Used only when the rc file does not set `build=`.
    #[arg(value_name = "BUILD_CMD")]
    pub build_cmd: Option<String>,

    /// Path to the rc file.
    ///
    /// Default: `.forgewatchrc` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = crate::config::DEFAULT_RC_FILE)]
    pub config: String,

    /// Do not run the build once at startup; wait for the first change.
    #[arg(long)]
    pub no_initial_build: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FORGEWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Interactively create the rc file and exit.
    Init,
}

impl CliArgs {
    /// Positional arguments as a fallback config.
    pub fn positional_config(&self) -> RawConfig {
        RawConfig {
            paths: self
                .watch_dir
                .as_deref()
                .map(|dirs| dirs.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            build: self.build_cmd.clone(),
            extensions: None,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

/// Text printed on a usage error.
pub fn usage() -> String {
    let bin = "forgewatch";
    format!(
        "Usage:\n  {bin} <watch_dir> <build_cmd>\n  {bin} init  # to create {}",
        crate::config::DEFAULT_RC_FILE
    )
}
