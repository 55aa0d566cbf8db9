//! Shell command parser
//!
//! This module handles parsing of attrsh shell commands:
//! - cd <address>
//! - writable on|off
//! - reload
//! - help [topic]
//! - exit, quit
//!
//! These commands don't use attribute path syntax, so they're parsed with
//! simple string matching. Anything else is treated as an attribute path.

use crate::error::{ParseError, Result};
use crate::parser::command::Command;

/// Parser for shell-specific commands
pub struct ShellCommandParser;

impl ShellCommandParser {
    /// Check if input is a shell command
    pub fn is_shell_command(input: &str) -> bool {
        ["cd", "writable", "help"]
            .iter()
            .any(|cmd| Self::is_command_word(input, cmd))
            || matches!(input, "exit" | "quit" | "reload")
    }

    /// `input` is `word` alone or `word` followed by arguments
    fn is_command_word(input: &str, word: &str) -> bool {
        input
            .strip_prefix(word)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    }

    /// Parse a shell command
    pub fn parse(input: &str) -> Result<Command> {
        let trimmed = input.trim();

        // Exit commands
        if matches!(trimmed, "exit" | "quit") {
            return Ok(Command::Exit);
        }

        if trimmed == "reload" {
            return Ok(Command::Reload);
        }

        // Help command
        if Self::is_command_word(trimmed, "help") {
            return Self::parse_help(trimmed);
        }

        if Self::is_command_word(trimmed, "writable") {
            return Self::parse_writable(trimmed);
        }

        // Cd command
        if Self::is_command_word(trimmed, "cd") {
            return Self::parse_cd(trimmed);
        }

        Err(ParseError::InvalidCommand(format!("Unknown shell command: {}", input)).into())
    }

    /// Parse help command
    fn parse_help(input: &str) -> Result<Command> {
        let topic = input
            .strip_prefix("help")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from);

        Ok(Command::Help(topic))
    }

    /// Parse writable command
    fn parse_writable(input: &str) -> Result<Command> {
        let arg = input.strip_prefix("writable").map(str::trim).unwrap_or("");

        match arg {
            "on" | "true" => Ok(Command::Writable(true)),
            "off" | "false" => Ok(Command::Writable(false)),
            other => Err(ParseError::InvalidCommand(format!(
                "Usage: writable on|off (got '{}')",
                other
            ))
            .into()),
        }
    }

    /// Parse cd command
    fn parse_cd(input: &str) -> Result<Command> {
        let target = input.strip_prefix("cd").map(str::trim).unwrap_or("");

        if target.is_empty() {
            return Ok(Command::Cd("/".to_string()));
        }

        Ok(Command::Cd(target.to_string()))
    }
}
