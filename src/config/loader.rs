// src/config/loader.rs

use std::path::Path;

use tracing::debug;

use crate::config::model::{RawConfig, WatchConfig};
use crate::errors::Result;
use crate::fs::FileSystem;

/// Name of the per-project configuration file.
pub const DEFAULT_RC_FILE: &str = ".forgewatchrc";

const PATH_KEYS: &[&str] = &["path", "ForgWatch_path"];
const BUILD_KEYS: &[&str] = &["build", "ForgWatch_build"];
const EXTENSION_KEYS: &[&str] = &["extensions", "ForgWatch_Extension"];

/// Parse the contents of an rc file.
///
/// Lines are `key=value`. Unknown keys and lines without `=` are ignored; a
/// key that appears twice keeps its last value. The build command is taken
/// verbatim, everything after the first `=`.
pub fn parse_rc(contents: &str) -> RawConfig {
    let mut raw = RawConfig::default();

    for line in contents.lines() {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();

        if PATH_KEYS.contains(&key) {
            raw.paths = value.split_whitespace().map(str::to_string).collect();
            debug!(paths = ?raw.paths, "loaded watch paths");
        } else if BUILD_KEYS.contains(&key) {
            raw.build = Some(value.to_string());
            debug!(build = %value, "loaded build command");
        } else if EXTENSION_KEYS.contains(&key) {
            raw.extensions = Some(value.to_string());
            debug!(extensions = %value, "loaded watched extensions");
        }
    }

    raw
}

/// Read the rc file at `path`.
///
/// A missing file is not an error: it yields an empty [`RawConfig`] so the
/// positional arguments can supply everything.
pub fn load_rc(fs: &dyn FileSystem, path: &Path) -> Result<RawConfig> {
    if !fs.exists(path) {
        debug!(?path, "no rc file present");
        return Ok(RawConfig::default());
    }
    let contents = fs.read_to_string(path)?;
    Ok(parse_rc(&contents))
}

/// Load the rc file, fill gaps from `fallback`, and resolve into a
/// [`WatchConfig`].
///
/// This is the entry point `run` uses; `fallback` carries the positional
/// `<watch_dir> <build_cmd>` arguments.
pub fn load_and_validate(
    fs: &dyn FileSystem,
    rc_path: &Path,
    fallback: RawConfig,
) -> Result<WatchConfig> {
    let raw = load_rc(fs, rc_path)?.or_fallback(fallback);
    raw.resolve(fs)
}
