// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod filter;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::cli::{CliArgs, CliCommand};
use crate::config::{WatchConfig, load_and_validate, run_wizard};
use crate::engine::{CoreLoop, DEBOUNCE_WINDOW, Runtime, RuntimeEvent, RuntimeOptions};
use crate::errors::ForgewatchError;
use crate::exec::{BuildSupervisor, ShellLauncher, ensure_not_nested};
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::{MAX_WATCHES, NotifyWatcherBackend, WatchRegistry};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the nested-instance guard
/// - `init` or config loading
/// - watch registry on the notify backend
/// - build supervisor on the shell launcher
/// - Ctrl-C / SIGTERM handling
pub async fn run(args: CliArgs) -> Result<()> {
    ensure_not_nested(|key| std::env::var(key).ok())?;

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let rc_path = PathBuf::from(&args.config);

    if let Some(CliCommand::Init) = args.command {
        return run_wizard(fs.as_ref(), &rc_path);
    }

    let cfg = match load_and_validate(fs.as_ref(), &rc_path, args.positional_config()) {
        Ok(cfg) => cfg,
        Err(err @ ForgewatchError::ConfigError(_)) => {
            eprintln!("{}", cli::usage());
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    print_banner(&cfg);

    // Runtime event channel. Unbounded: notify's thread must never block on
    // it while the runtime is inside a subscribe call.
    let (rt_tx, rt_rx) = mpsc::unbounded_channel::<RuntimeEvent>();

    let backend = NotifyWatcherBackend::new(rt_tx.clone())?;
    let registry = WatchRegistry::new(backend, Arc::clone(&fs), MAX_WATCHES);
    let supervisor = BuildSupervisor::new(ShellLauncher::new());

    spawn_shutdown_listener(rt_tx);

    let options = RuntimeOptions {
        build_on_start: !args.no_initial_build,
    };
    let core = CoreLoop::new(cfg, DEBOUNCE_WINDOW);
    let runtime = Runtime::new(core, registry, supervisor, rt_rx, options);
    runtime.run().await?;

    println!("\nExited cleanly.");
    Ok(())
}

fn print_banner(cfg: &WatchConfig) {
    for root in cfg.roots() {
        println!("Watching directory: {}", root.display());
    }
    println!("Build command: {}", cfg.build_command());
    if let Some(exts) = cfg.extensions() {
        println!("Extensions: {exts}");
    }
    info!(roots = cfg.roots().len(), "configuration loaded");
}

/// Turn Ctrl-C (and SIGTERM on Unix) into a single `ShutdownRequested`.
///
/// The listener only sends the message; the runtime performs the teardown
/// when it next reads the channel.
fn spawn_shutdown_listener(tx: mpsc::UnboundedSender<RuntimeEvent>) {
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        let _ = tx.send(RuntimeEvent::ShutdownRequested);
    });
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            warn!("failed to listen for SIGTERM: {e}");
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
            return;
        }
    };

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                eprintln!("failed to listen for Ctrl+C: {e}");
                terminate.recv().await;
            }
        }
        _ = terminate.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}
