// src/config/wizard.rs

//! Interactive `forgewatch init`.
//!
//! Prompting is done with `dialoguer`; rendering and writing the rc file are
//! separate so they can be exercised without a terminal.

use std::path::Path;

use anyhow::{Context, Result};
use dialoguer::Input;
use tracing::info;

use crate::config::model::RawConfig;
use crate::fs::FileSystem;

/// Ask for the watch directory, build command and extension list, then write
/// them to `rc_path`.
pub fn run_wizard(fs: &dyn FileSystem, rc_path: &Path) -> Result<()> {
    let path: String = Input::new()
        .with_prompt("Enter directory to watch")
        .interact_text()
        .context("Failed to read directory path")?;

    let build: String = Input::new()
        .with_prompt("Enter build/run command")
        .interact_text()
        .context("Failed to read build command")?;

    let extensions: String = Input::new()
        .with_prompt("Enter every file type to watch, space delimited (e.g. .c .h)")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read the extension list")?;

    let raw = RawConfig {
        paths: path.split_whitespace().map(str::to_string).collect(),
        build: Some(build),
        extensions: Some(extensions),
    };

    write_rc(fs, rc_path, &raw)?;
    println!("{} created successfully.", rc_path.display());
    Ok(())
}

/// Render `raw` in the rc file format understood by [`super::parse_rc`].
pub fn render_rc(raw: &RawConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("path={}\n", raw.paths.join(" ")));
    out.push_str(&format!("build={}\n", raw.build.as_deref().unwrap_or_default()));
    out.push_str(&format!(
        "extensions={}\n",
        raw.extensions.as_deref().unwrap_or_default()
    ));
    out
}

/// Write `raw` to `rc_path`, replacing any existing file.
pub fn write_rc(fs: &dyn FileSystem, rc_path: &Path, raw: &RawConfig) -> Result<()> {
    fs.write(rc_path, render_rc(raw).as_bytes())
        .with_context(|| format!("Failed to create {}", rc_path.display()))?;
    info!(path = %rc_path.display(), "wrote rc file");
    Ok(())
}
