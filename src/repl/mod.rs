//! REPL (Read-Eval-Print Loop) for attrsh
//!
//! This module provides an interactive shell interface with features:
//! - Line editing with reedline
//! - Persistent command history
//! - Attribute path completion against the current resource
//! - Path highlighting with error marking
//! - Prompt showing the current resource address

pub mod completion;
mod completer;
mod engine;
mod highlighter;
mod prompt;
mod shared_state;

pub use completer::AttributePathCompleter;
pub use engine::ReplEngine;
pub use highlighter::PathHighlighter;
pub use prompt::AttrPrompt;
pub use shared_state::SharedState;
