// src/filter/extension.rs

use std::collections::BTreeSet;
use std::fmt;

/// Set of watched extensions, each including its leading dot (e.g. `".c"`).
///
/// Parsed once from the whitespace-separated `extensions=` value. An empty
/// list means every extension is watched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionAllowList {
    extensions: BTreeSet<String>,
}

impl ExtensionAllowList {
    /// Parse a whitespace-separated list. Empty tokens are dropped.
    pub fn parse(raw: &str) -> Self {
        let extensions = raw.split_whitespace().map(str::to_string).collect();
        Self { extensions }
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn contains(&self, ext: &str) -> bool {
        self.extensions.contains(ext)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Entries that can never match because they lack the leading dot.
    pub fn undotted(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|ext| !ext.starts_with('.'))
    }
}

impl fmt::Display for ExtensionAllowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(" "))
    }
}

/// Returns `true` if `name`'s extension is in `allow_list`.
///
/// With no list (or an empty one) everything passes. Otherwise the text from
/// the last `.` to the end of `name` must equal one entry exactly; names with
/// no `.` never match.
pub fn is_watched_extension(name: &str, allow_list: Option<&ExtensionAllowList>) -> bool {
    let allow_list = match allow_list {
        Some(list) if !list.is_empty() => list,
        _ => return true,
    };

    match name.rfind('.') {
        Some(idx) => allow_list.contains(&name[idx..]),
        None => false,
    }
}
