//! Completion system for the attrsh REPL
//!
//! Completion works on the text before the cursor:
//!
//! - the text is parsed with the attribute path grammar
//!   ([`crate::parser::parse_attribute_path`]);
//! - the **Resolver** walks the attribute descriptions of the current
//!   resource along the committed segments and lists what may follow;
//! - the **Engine** ties both to a schema source and the shared shell state.
//!
//! # Examples
//!
//! ```
//! use attrsh::repl::completion::CompletionEngine;
//! use attrsh::schema::{AttributeDescriptor, AttributeType, DescriptorTree, PrimitiveType};
//! use std::sync::Arc;
//!
//! let schema = DescriptorTree::new()
//!     .with("port", AttributeDescriptor::new(AttributeType::Primitive(PrimitiveType::Int)))
//!     .with("path", AttributeDescriptor::new(AttributeType::Primitive(PrimitiveType::String)));
//! let engine = CompletionEngine::with_schema(Arc::new(schema), false);
//!
//! let completion = engine.complete("pa", 2).unwrap();
//! assert_eq!(completion.candidates, ["path"]);
//! assert_eq!(completion.offset, 0);
//! ```

mod engine;
mod resolver;

pub use engine::CompletionEngine;
pub use resolver::{Completion, resolve};
