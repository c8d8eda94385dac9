#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared helpers for the typesmith workspace.
//!
//! - [`paths`]: portable `/` separated paths from configuration files
//! - [`colors`]: ANSI palette for CLI status lines and dumps

pub mod colors;
pub mod paths;


pub use colors::Colors;
pub use paths::{normalize_separators, to_host_path};
