//! Color output support for terminal formatting
//!
//! This module provides colorization for terminal output:
//! - Styles for the different parts of an attribute description
//! - Support for enabling/disabling colors dynamically

use nu_ansi_term::{Color, Style};

/// Color scheme for output highlighting
pub struct Colorizer {
    /// Enable colors
    enabled: bool,
}

impl Colorizer {
    /// Create a new colorizer
    ///
    /// # Arguments
    /// * `enabled` - Enable color output
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.enabled {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Attribute paths (bold cyan)
    pub fn path(&self, text: &str) -> String {
        self.paint(Color::Cyan.bold(), text)
    }

    /// Field labels (dimmed)
    pub fn label(&self, text: &str) -> String {
        self.paint(Style::new().dimmed(), text)
    }

    /// Type names (yellow)
    pub fn type_name(&self, text: &str) -> String {
        self.paint(Color::Yellow.normal(), text)
    }

    /// Read-only access (red); writable access (green)
    pub fn access(&self, text: &str, writable: bool) -> String {
        let color = if writable { Color::Green } else { Color::Red };
        self.paint(color.normal(), text)
    }

    /// Errors (red, prefixed)
    pub fn error(&self, text: &str) -> String {
        self.paint(Color::Red.normal(), &format!("Error: {}", text))
    }
}
