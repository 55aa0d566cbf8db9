//! Completion engine - orchestrates the completion flow
//!
//! Parses the text before the cursor as an attribute path, fetches the
//! attribute descriptions of the current resource and resolves candidates.

use std::sync::Arc;

use tracing::debug;

use super::resolver::{Completion, resolve};
use crate::parser::{ParsedPath, PathPosition, parse_attribute_path};
use crate::repl::SharedState;
use crate::schema::{AttributeDescriptor, DescriptorTree, SchemaSource};

/// Where the engine gets its attribute descriptions from
enum SchemaOrigin {
    /// One fixed tree
    Fixed(Arc<DescriptorTree>),
    /// The resource currently selected in the shell
    Source {
        source: Arc<dyn SchemaSource>,
        state: SharedState,
    },
}

/// Attribute path completion engine
pub struct CompletionEngine {
    origin: SchemaOrigin,
    writable_only: bool,
}

impl CompletionEngine {
    /// Engine over a fixed attribute description
    ///
    /// # Arguments
    /// * `schema` - Attribute descriptions to complete against
    /// * `writable_only` - Hide read-only attributes
    pub fn with_schema(schema: Arc<DescriptorTree>, writable_only: bool) -> Self {
        Self {
            origin: SchemaOrigin::Fixed(schema),
            writable_only,
        }
    }

    /// Engine following the shell's current resource address
    ///
    /// The writable-only flag is read from `state` on every call.
    ///
    /// # Arguments
    /// * `source` - Provider of attribute descriptions
    /// * `state` - Shared shell state holding the address and flags
    pub fn with_source(source: Arc<dyn SchemaSource>, state: SharedState) -> Self {
        Self {
            origin: SchemaOrigin::Source { source, state },
            writable_only: false,
        }
    }

    fn writable_only(&self) -> bool {
        match &self.origin {
            SchemaOrigin::Fixed(_) => self.writable_only,
            SchemaOrigin::Source { state, .. } => state.writable_only(),
        }
    }

    /// Attribute descriptions for the current resource
    ///
    /// Fetch failures are logged and reported as no schema.
    pub fn schema(&self) -> Option<Arc<DescriptorTree>> {
        match &self.origin {
            SchemaOrigin::Fixed(schema) => Some(Arc::clone(schema)),
            SchemaOrigin::Source { source, state } => {
                let address = state.address();
                match source.fetch_schema(&address) {
                    Ok(Some(schema)) => Some(schema),
                    Ok(None) => {
                        debug!("No attribute description for {}", address);
                        None
                    }
                    Err(e) => {
                        debug!("Failed to fetch schema for {}: {}", address, e);
                        None
                    }
                }
            }
        }
    }

    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index); text after it is ignored
    ///
    /// # Returns
    /// * `None` - No completion possible: syntax error, text past the path, no schema, or an unknown path
    /// * `Some(completion)` - Sorted candidates (possibly none) and the offset they replace from
    pub fn complete(&self, line: &str, pos: usize) -> Option<Completion> {
        let path = self.parse_before_cursor(line, pos)?;
        if path.is_halted() {
            debug!("No completion past the end of the path at {:?}", path.halted_at());
            return None;
        }

        let schema = self.schema()?;
        resolve(&path, &schema, self.writable_only())
    }

    /// Look up the descriptor an attribute path names
    ///
    /// # Arguments
    /// * `expression` - A complete attribute path, e.g. `socket.port`
    ///
    /// # Returns
    /// * `Option<AttributeDescriptor>` - The descriptor, if the path names one
    pub fn describe(&self, expression: &str) -> Option<AttributeDescriptor> {
        let path = parse_attribute_path(expression.trim()).ok()?;
        // a trailing `.` or `[` leaves the path unfinished
        let complete = matches!(path.position(), PathPosition::Name | PathPosition::CloseBracket);
        if path.is_halted() || !complete {
            return None;
        }
        let schema = self.schema()?;
        schema.lookup(&path.full_path()).cloned()
    }

    fn parse_before_cursor(&self, line: &str, pos: usize) -> Option<ParsedPath> {
        let Some(before) = line.get(..pos) else {
            debug!("Cursor {} is not a character boundary of {:?}", pos, line);
            return None;
        };

        match parse_attribute_path(before) {
            Ok(path) => Some(path),
            Err(e) => {
                debug!("Not completing {:?}: {}", before, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        AccessType, AttributeType, PrimitiveType, ResourceAddress, StaticSchemaSource, ValueType,
    };

    fn string(access: AccessType) -> AttributeDescriptor {
        AttributeDescriptor::new(AttributeType::Primitive(PrimitiveType::String))
            .with_access(access)
    }

    fn schema() -> DescriptorTree {
        let socket = DescriptorTree::new()
            .with("port", string(AccessType::ReadWrite).with_description("Port"))
            .with("host", string(AccessType::ReadOnly));
        DescriptorTree::new()
            .with(
                "socket",
                AttributeDescriptor::new(AttributeType::Object(Some(ValueType::Complex(socket)))),
            )
            .with("status", string(AccessType::ReadOnly))
    }

    fn create_test_engine(writable_only: bool) -> CompletionEngine {
        CompletionEngine::with_schema(Arc::new(schema()), writable_only)
    }

    #[test]
    fn test_complete_after_dot() {
        let engine = create_test_engine(false);
        let completion = engine.complete("socket.", 7).unwrap();
        assert_eq!(completion.candidates, ["host", "port"]);
        assert_eq!(completion.offset, 7);
    }

    #[test]
    fn test_writable_only() {
        let engine = create_test_engine(true);
        assert_eq!(engine.complete("socket.", 7).unwrap().candidates, ["port"]);
        assert_eq!(engine.complete("", 0).unwrap().candidates, ["socket"]);
    }

    #[test]
    fn test_text_after_cursor_is_ignored() {
        let engine = create_test_engine(false);
        let completion = engine.complete("socket.po=8080", 9).unwrap();
        assert_eq!(completion.candidates, ["port"]);
        assert_eq!(completion.offset, 7);
    }

    #[test]
    fn test_no_completion_cases() {
        let engine = create_test_engine(false);
        // syntax error
        assert!(engine.complete("socket..", 8).is_none());
        // past the end of the path
        assert!(engine.complete("socket.port=", 12).is_none());
        // unknown parent
        assert!(engine.complete("nope.", 5).is_none());
        // cursor inside a multi-byte character
        assert!(engine.complete("é", 1).is_none());
    }

    #[test]
    fn test_describe() {
        let engine = create_test_engine(false);
        let port = engine.describe("socket.port").unwrap();
        assert_eq!(port.description.as_deref(), Some("Port"));
        assert!(engine.describe("socket[0].port").is_some());
        assert!(engine.describe("socket.missing").is_none());
        assert!(engine.describe("socket.port = 1").is_none());
    }

    #[test]
    fn test_describe_rejects_unfinished_path() {
        let engine = create_test_engine(false);
        assert!(engine.describe("socket.").is_none());
        assert!(engine.describe("socket[").is_none());
        assert!(engine.describe("").is_none());
        assert!(engine.describe("socket[0]").is_some());
        assert!(engine.describe("socket").is_some());
    }

    #[test]
    fn test_source_follows_shared_state() {
        let web = ResourceAddress::root().child("subsystem", "web");
        let source = StaticSchemaSource::new().with(web.clone(), schema());
        let state = SharedState::new(ResourceAddress::root());
        let engine = CompletionEngine::with_source(Arc::new(source), state.clone());

        // nothing described at the root
        assert!(engine.complete("so", 2).is_none());

        state.set_address(web);
        assert_eq!(engine.complete("so", 2).unwrap().candidates, ["socket"]);

        state.set_writable_only(true);
        assert_eq!(engine.complete("", 0).unwrap().candidates, ["socket"]);
        state.set_writable_only(false);
        assert_eq!(engine.complete("", 0).unwrap().candidates, ["socket", "status"]);
    }
}
