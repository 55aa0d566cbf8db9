//! Completer for reedline - provides completion suggestions

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};

use super::completion::CompletionEngine;

/// Attribute path completer for reedline
pub struct AttributePathCompleter {
    /// Completion engine for schema-aware suggestions
    completion_engine: Arc<CompletionEngine>,
}

impl AttributePathCompleter {
    /// Create a new attribute path completer
    ///
    /// # Arguments
    /// * `completion_engine` - Engine resolving candidates
    ///
    /// # Returns
    /// * `Self` - New completer
    pub fn new(completion_engine: Arc<CompletionEngine>) -> Self {
        Self { completion_engine }
    }

    /// Description of a candidate attribute, looked up by its full path
    fn describe(&self, line: &str, start: usize, candidate: &str) -> Option<String> {
        if matches!(candidate, "." | "[" | "=") {
            return None;
        }
        let path = format!("{}{}", line.get(..start)?, candidate);
        self.completion_engine
            .describe(&path)
            .and_then(|descriptor| descriptor.description)
    }
}

impl Completer for AttributePathCompleter {
    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `Vec<Suggestion>` - List of completion suggestions
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let Some(completion) = self.completion_engine.complete(line, pos) else {
            return Vec::new();
        };
        let start = completion.offset;

        // Convert to reedline Suggestions
        completion
            .candidates
            .into_iter()
            .map(|candidate| Suggestion {
                description: self.describe(line, start, &candidate),
                value: candidate,
                span: Span::new(start, pos),
                append_whitespace: false,
                ..Default::default()
            })
            .collect()
    }
}
