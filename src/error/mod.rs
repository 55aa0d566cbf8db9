//! Error handling module for attrsh.
//!
//! This module provides the error types used across the crate:
//! - Parse errors for malformed attribute paths and resource addresses
//! - Schema errors raised while loading management model descriptions
//! - Configuration errors
//!
//! Resolution misses (an attribute that does not exist, a read-only
//! attribute under writable-only completion) are not errors and never
//! surface here.
//!
//! # Example
//!
//! ```rust
//! use attrsh::error::{AttrshError, ParseError, Result};
//!
//! fn check(input: &str) -> Result<()> {
//!     if input.starts_with('.') {
//!         return Err(ParseError::MissingAttributeName { separator: '.', offset: 0 }.into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(matches!(check(".foo"), Err(AttrshError::Parse(_))));
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{AttrshError, ConfigError, ParseError, Result, SchemaError};
