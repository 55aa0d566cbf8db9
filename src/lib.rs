//! Attribute path shell library
//!
//! This library provides the core of attrsh: a character-driven state
//! parser for attribute path expressions such as `foo.bar[2].baz` and a
//! schema-aware completion engine proposing what may follow the cursor.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `executor`: Shell command execution
//! - `formatter`: Output formatting and display
//! - `parser`: Character automaton, attribute path grammar and command parsing
//! - `repl`: Interactive REPL engine and completion
//! - `schema`: Attribute descriptions, resource addresses and schema sources
//!
//! # Example
//!
//! ```
//! use attrsh::parser::parse_attribute_path;
//! use attrsh::repl::completion::resolve;
//! use attrsh::schema::{AccessType, AttributeDescriptor, AttributeType, DescriptorTree, PrimitiveType};
//!
//! let schema = DescriptorTree::new()
//!     .with("name", AttributeDescriptor::new(AttributeType::Primitive(PrimitiveType::String)))
//!     .with(
//!         "secret",
//!         AttributeDescriptor::new(AttributeType::Primitive(PrimitiveType::String))
//!             .with_access(AccessType::ReadOnly),
//!     );
//!
//! let path = parse_attribute_path("").unwrap();
//! let completion = resolve(&path, &schema, true).unwrap();
//! assert_eq!(completion.candidates, ["name"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod formatter;
pub mod parser;
pub mod repl;
pub mod schema;

// Re-export commonly used types
pub use config::Config;
pub use error::{AttrshError, Result};
pub use executor::{ExecutionContext, ExecutionResult};
pub use formatter::Formatter;
pub use parser::{Command, Parser, parse_attribute_path};
pub use repl::{ReplEngine, SharedState};
pub use schema::{DescriptorTree, SchemaSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
