// src/exec/nesting.rs

use crate::errors::{ForgewatchError, Result};

/// Environment variable set in every supervised child.
pub const NESTED_MARKER_VAR: &str = "FORGEWATCH_IS";

/// Value of [`NESTED_MARKER_VAR`] meaning "inside a forgewatch build".
pub const NESTED_MARKER_VALUE: &str = "1";

/// Refuse to run when the marker says we are a descendant of another
/// forgewatch's build.
///
/// `lookup` reads one environment variable; `main` passes `std::env::var`.
pub fn ensure_not_nested(lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
    match lookup(NESTED_MARKER_VAR) {
        Some(value) if value == NESTED_MARKER_VALUE => Err(ForgewatchError::NestedInstance),
        _ => Ok(()),
    }
}
