// src/config/validate.rs

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::model::{RawConfig, WatchConfig};
use crate::errors::{ForgewatchError, Result};
use crate::filter::ExtensionAllowList;
use crate::fs::FileSystem;

impl RawConfig {
    /// Validate and resolve into a [`WatchConfig`].
    ///
    /// - at least one watch path, each canonicalized and required to be a
    ///   directory;
    /// - a non-blank build command;
    /// - the extension list parsed once; undotted entries are kept but
    ///   reported since they can never match.
    pub fn resolve(self, fs: &dyn FileSystem) -> Result<WatchConfig> {
        let roots = resolve_roots(fs, &self.paths)?;
        let build = ensure_build_command(self.build)?;
        let extensions = self.extensions.as_deref().map(ExtensionAllowList::parse);

        if let Some(list) = &extensions {
            for ext in list.undotted() {
                warn!(
                    extension = %ext,
                    "extension has no leading '.' and will never match"
                );
            }
        }

        Ok(WatchConfig::new_unchecked(roots, build, extensions))
    }
}

fn resolve_roots(fs: &dyn FileSystem, paths: &[String]) -> Result<Vec<PathBuf>> {
    if paths.is_empty() {
        return Err(ForgewatchError::ConfigError(
            "no directory to watch was configured".to_string(),
        ));
    }

    let mut roots: Vec<PathBuf> = Vec::with_capacity(paths.len());
    for raw in paths {
        let resolved = fs.canonicalize(Path::new(raw)).map_err(|_| {
            ForgewatchError::ConfigError(format!(
                "Failed to resolve watch directory path '{}'",
                raw
            ))
        })?;

        if !fs.is_dir(&resolved) {
            return Err(ForgewatchError::ConfigError(format!(
                "watch path '{}' is not a directory",
                raw
            )));
        }

        if !roots.contains(&resolved) {
            roots.push(resolved);
        }
    }
    Ok(roots)
}

fn ensure_build_command(build: Option<String>) -> Result<String> {
    match build {
        Some(cmd) if !cmd.trim().is_empty() => Ok(cmd),
        _ => Err(ForgewatchError::ConfigError(
            "no build command was configured".to_string(),
        )),
    }
}
