//! Portable path handling.
//!
//! Configuration files spell paths with `/`. Every such path goes through
//! [`to_host_path`] before it reaches the filesystem.

use std::path::{MAIN_SEPARATOR, MAIN_SEPARATOR_STR, PathBuf};

/// Replace `/` with the host separator.
///
/// On hosts where the separator already is `/` the input is returned as is.
pub fn normalize_separators(path: &str) -> String {
    if MAIN_SEPARATOR == '/' {
        return path.to_string();
    }
    path.replace('/', MAIN_SEPARATOR_STR)
}

/// Normalize separators and convert to a `PathBuf`.
pub fn to_host_path(path: &str) -> PathBuf {
    PathBuf::from(normalize_separators(path))
}
