//! Command type definitions for attrsh
//!
//! This module defines the commands the shell understands: shell commands
//! that change session state, and attribute paths to describe.

/// Represents a parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Describe the attribute an attribute path names
    Describe(String),

    /// Change the current resource address (absolute, relative or `..`)
    Cd(String),

    /// Toggle writable-only completion
    Writable(bool),

    /// Drop cached attribute descriptions
    Reload,

    /// Help command with optional topic
    Help(Option<String>),

    /// Exit/quit command
    Exit,
}
