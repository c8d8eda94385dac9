//! ANSI color codes for terminal output.
//!
//! - Cyan: status line prefixes
//! - Blue: type and module names
//! - Green: file names written to disk
//! - Dim: structure and metadata
//! - Reset: return to default

/// ANSI color palette for CLI output.
///
/// Uses only standard 16-color ANSI codes so it reads in light and dark themes.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub cyan: &'static str,
    pub blue: &'static str,
    pub green: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        cyan: "\x1b[36m",
        blue: "\x1b[34m",
        green: "\x1b[32m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        cyan: "",
        blue: "",
        green: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}
