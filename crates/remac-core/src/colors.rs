//! ANSI color codes for terminal output.
//!
//! Standard 16-color codes only (no RGB), so output works in both light and
//! dark themes. The simulator uses yellow for active regions and final
//! states, cyan for match boundaries.

/// ANSI color palette for CLI output.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub blue: &'static str,
    pub cyan: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub red: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    /// Colors enabled (ANSI escape codes).
    pub const ON: Self = Self {
        blue: "\x1b[34m",
        cyan: "\x1b[36m",
        green: "\x1b[32m",
        yellow: "\x1b[33m",
        red: "\x1b[31m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    /// Colors disabled (empty strings).
    pub const OFF: Self = Self {
        blue: "",
        cyan: "",
        green: "",
        yellow: "",
        red: "",
        dim: "",
        reset: "",
    };

    /// Create colors based on enabled flag.
    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    /// Check if colors are enabled.
    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}
