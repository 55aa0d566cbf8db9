//! Attribute path and command parsing for attrsh
//!
//! # Architecture
//!
//! The parser is split into focused modules:
//! - `state_parser`: generic character automaton (states, handlers, observer callbacks)
//! - `attribute_path`: the attribute path grammar expressed as automaton states
//! - `path`: observer turning automaton events into a [`ParsedPath`]
//! - `command`: Command type definitions
//! - `shell_commands`: Parser for shell commands (cd, writable, help, etc.)
//!
//! # Examples
//!
//! ```
//! use attrsh::parser::{Command, Parser, PathPosition, parse_attribute_path};
//!
//! let path = parse_attribute_path("socket[0].po").unwrap();
//! assert_eq!(path.segments(), ["socket"]);
//! assert_eq!(path.fragment(), "po");
//! assert_eq!(path.position(), PathPosition::Name);
//!
//! let mut parser = Parser::new();
//! assert_eq!(parser.parse("writable on").unwrap(), Command::Writable(true));
//! ```

pub mod attribute_path;
mod command;
pub mod path;
mod shell_commands;
pub mod state_parser;

// Re-export public API
pub use attribute_path::{is_attribute_name_char, parse_attribute_path};
pub use command::Command;
pub use path::{ParsedPath, PathAccumulator, PathPosition};
pub use state_parser::{CharacterHandler, ParsingContext, ParsingObserver, ParsingState};
pub(crate) use shell_commands::ShellCommandParser;

use crate::error::{ParseError, Result};

/// Main parser for attrsh input lines
#[derive(Debug, Default)]
pub struct Parser {}

impl Parser {
    /// Create a new parser instance
    pub fn new() -> Self {
        Self {}
    }

    /// Parse an input line into a Command
    ///
    /// Shell commands are recognised first; anything else must be a
    /// syntactically valid attribute path.
    ///
    /// # Arguments
    ///
    /// * `input` - The input line to parse
    ///
    /// # Returns
    ///
    /// * `Result<Command>` - The parsed command or an error
    pub fn parse(&mut self, input: &str) -> Result<Command> {
        let trimmed = input.trim();

        // Handle empty input
        if trimmed.is_empty() {
            return Err(ParseError::InvalidCommand("Empty input".to_string()).into());
        }

        // Check if it's a shell command (cd, writable, reload, help, exit, quit)
        if ShellCommandParser::is_shell_command(trimmed) {
            return ShellCommandParser::parse(trimmed);
        }

        let path = parse_attribute_path(trimmed)?;
        if let Some(offset) = path.halted_at() {
            return Err(ParseError::InvalidCommand(format!(
                "Unexpected input after attribute path at index {}: {}",
                offset,
                &trimmed[offset..]
            ))
            .into());
        }

        Ok(Command::Describe(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AttrshError;

    #[test]
    fn test_parse_shell_command() {
        let mut parser = Parser::new();
        assert_eq!(parser.parse("  exit ").unwrap(), Command::Exit);
        assert_eq!(parser.parse("reload").unwrap(), Command::Reload);
    }

    #[test]
    fn test_parse_attribute_path() {
        let mut parser = Parser::new();
        assert_eq!(
            parser.parse("socket[1].port").unwrap(),
            Command::Describe("socket[1].port".to_string())
        );
    }

    #[test]
    fn test_parse_errors() {
        let mut parser = Parser::new();
        assert!(matches!(
            parser.parse(""),
            Err(AttrshError::Parse(ParseError::InvalidCommand(_)))
        ));
        assert!(matches!(
            parser.parse("socket..port"),
            Err(AttrshError::Parse(ParseError::MissingAttributeName { offset: 7, .. }))
        ));
        assert!(matches!(
            parser.parse("socket.port = 1"),
            Err(AttrshError::Parse(ParseError::InvalidCommand(_)))
        ));
    }
}
