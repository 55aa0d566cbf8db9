use std::{fmt, io};

/// Crate-wide `Result` type using [`AttrshError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, AttrshError>;

/// Top-level error type for attrsh operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum AttrshError {
    /// Attribute path or address parsing errors.
    Parse(ParseError),

    /// Schema loading and description errors.
    Schema(SchemaError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Parsing-specific errors.
///
/// Offsets are byte offsets into the parsed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `.` or `[` was typed with no attribute name in front of it.
    MissingAttributeName { separator: char, offset: usize },

    /// A character the active state does not accept.
    UnexpectedCharacter {
        character: char,
        offset: usize,
        expected: &'static str,
    },

    /// Input ended while a state requiring explicit termination was active.
    Unterminated { state: &'static str, offset: usize },

    /// Malformed resource address.
    InvalidAddress(String),

    /// Shell input that is not a known command.
    InvalidCommand(String),
}

/// Schema-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Snapshot file could not be read.
    Unreadable(String),

    /// Snapshot content is not valid JSON or has the wrong shape.
    InvalidFormat(String),

    /// A wildcard description response has no wildcard entry.
    MissingWildcard,

    /// An address element in a description response is not a property.
    InvalidAddressNode(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Anything else.
    Generic(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for AttrshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrshError::Parse(e) => write!(f, "{e}"),
            AttrshError::Schema(e) => write!(f, "Schema error: {e}"),
            AttrshError::Config(e) => write!(f, "Configuration error: {e}"),
            AttrshError::Io(e) => write!(f, "I/O error: {e}"),
            AttrshError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingAttributeName { separator, offset } => {
                write!(f, "Attribute name is missing before '{separator}' at index {offset}")
            }
            ParseError::UnexpectedCharacter {
                character,
                offset,
                expected,
            } => write!(
                f,
                "Unexpected '{character}' at index {offset}, expected {expected}"
            ),
            ParseError::Unterminated { state, offset } => {
                write!(f, "Input ended at index {offset} inside unterminated {state}")
            }
            ParseError::InvalidAddress(addr) => write!(f, "Invalid resource address: {addr}"),
            ParseError::InvalidCommand(cmd) => write!(f, "Invalid command: {cmd}"),
        }
    }
}

impl ParseError {
    /// Byte offset the error points at, if it refers to a position in the input.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::MissingAttributeName { offset, .. }
            | ParseError::UnexpectedCharacter { offset, .. }
            | ParseError::Unterminated { offset, .. } => Some(*offset),
            ParseError::InvalidAddress(_) | ParseError::InvalidCommand(_) => None,
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Unreadable(msg) => write!(f, "Failed to read schema: {msg}"),
            SchemaError::InvalidFormat(msg) => write!(f, "Invalid schema format: {msg}"),
            SchemaError::MissingWildcard => write!(f, "Failed to locate the wildcard result"),
            SchemaError::InvalidAddressNode(node) => {
                write!(f, "Address element is not a property: {node}")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AttrshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttrshError::Parse(e) => Some(e),
            AttrshError::Schema(e) => Some(e),
            AttrshError::Config(e) => Some(e),
            AttrshError::Io(e) => Some(e),
            AttrshError::Generic(_) => None,
        }
    }
}
impl std::error::Error for ParseError {}
impl std::error::Error for SchemaError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to AttrshError ========================= */

impl From<io::Error> for AttrshError {
    fn from(err: io::Error) -> Self {
        AttrshError::Io(err)
    }
}

impl From<ParseError> for AttrshError {
    fn from(err: ParseError) -> Self {
        AttrshError::Parse(err)
    }
}

impl From<SchemaError> for AttrshError {
    fn from(err: SchemaError) -> Self {
        AttrshError::Schema(err)
    }
}

impl From<ConfigError> for AttrshError {
    fn from(err: ConfigError) -> Self {
        AttrshError::Config(err)
    }
}

impl From<String> for AttrshError {
    fn from(msg: String) -> Self {
        AttrshError::Generic(msg)
    }
}

impl From<&str> for AttrshError {
    fn from(msg: &str) -> Self {
        AttrshError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_name_message() {
        let err = ParseError::MissingAttributeName {
            separator: '.',
            offset: 4,
        };
        assert_eq!(
            err.to_string(),
            "Attribute name is missing before '.' at index 4"
        );
        assert_eq!(err.offset(), Some(4));
    }

    #[test]
    fn test_wrapped_parse_error_is_transparent() {
        let err: AttrshError = ParseError::InvalidAddress("/a".to_string()).into();
        assert_eq!(err.to_string(), "Invalid resource address: /a");
    }

    #[test]
    fn test_schema_error_prefix() {
        let err: AttrshError = SchemaError::MissingWildcard.into();
        assert_eq!(
            err.to_string(),
            "Schema error: Failed to locate the wildcard result"
        );
    }
}
