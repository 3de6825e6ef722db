// src/filter/noise.rs

/// Suffixes left behind by editors and tools that never warrant a rebuild.
const NOISE_SUFFIXES: &[&str] = &[".swp", ".swo", ".tmp", "~"];

/// Returns `true` when `name` is a temporary/hidden file that must be ignored.
///
/// Empty names, anything starting with `.` (dotfiles, `.#lock` files) and
/// names ending in one of the noise suffixes are noise.
pub fn is_noise(name: &str) -> bool {
    if name.is_empty() || name.starts_with('.') {
        return true;
    }

    NOISE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}
