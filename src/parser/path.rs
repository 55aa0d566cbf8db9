//! Attribute path accumulation
//!
//! [`PathAccumulator`] observes the attribute-path automaton and turns its
//! events into a [`ParsedPath`]: the committed name segments, the fragment typed
//! since the last separator, and where a completion should be inserted.

use tracing::trace;

use super::attribute_path::{CLOSE_BRACKET_ID, DOT_ID, LIST_INDEX_ID, OPEN_BRACKET_ID};
use super::state_parser::{ParsingContext, ParsingObserver};
use crate::error::ParseError;

/// Committed attribute names, in document order.
///
/// Most paths typed interactively have zero or one committed segment, so
/// those cases are stored without a heap-allocated list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Segments {
    #[default]
    Empty,
    One(String),
    Many(Vec<String>),
}

impl Segments {
    /// Append a segment
    pub fn push(&mut self, segment: String) {
        *self = match std::mem::take(self) {
            Segments::Empty => Segments::One(segment),
            Segments::One(first) => Segments::Many(vec![first, segment]),
            Segments::Many(mut all) => {
                all.push(segment);
                Segments::Many(all)
            }
        };
    }

    /// View the segments as a slice
    pub fn as_slice(&self) -> &[String] {
        match self {
            Segments::Empty => &[],
            Segments::One(segment) => std::slice::from_ref(segment),
            Segments::Many(all) => all,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Segments::Empty)
    }
}

/// Where in the path grammar the input stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPosition {
    /// Typing an attribute name, or nothing typed yet
    Name,
    /// Right after a `.`
    AfterDot,
    /// Right after a `[`
    OpenBracket,
    /// Inside `[...]`
    ListIndex,
    /// Right after a `]`
    CloseBracket,
}

impl PathPosition {
    /// Whether the cursor sits inside an attribute name (or at the very start)
    pub fn is_name(&self) -> bool {
        matches!(self, PathPosition::Name)
    }

    fn from_state_id(id: Option<&str>) -> Self {
        match id {
            Some(DOT_ID) => PathPosition::AfterDot,
            Some(OPEN_BRACKET_ID) => PathPosition::OpenBracket,
            Some(LIST_INDEX_ID) => PathPosition::ListIndex,
            Some(CLOSE_BRACKET_ID) => PathPosition::CloseBracket,
            _ => PathPosition::Name,
        }
    }
}

/// Result of parsing an attribute path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    segments: Segments,
    fragment: String,
    position: PathPosition,
    insertion_offset: usize,
    halted_at: Option<usize>,
}

impl ParsedPath {
    /// Names committed by a following `.` or `[`
    pub fn segments(&self) -> &[String] {
        self.segments.as_slice()
    }

    /// Characters typed since the last separator
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Committed segments plus the trailing fragment, if any
    pub fn full_path(&self) -> Vec<&str> {
        let mut path: Vec<&str> = self.segments().iter().map(String::as_str).collect();
        if !self.fragment.is_empty() {
            path.push(&self.fragment);
        }
        path
    }

    /// Grammar position of the last entered state
    pub fn position(&self) -> PathPosition {
        self.position
    }

    /// Byte offset at which a completion candidate should be inserted
    pub fn insertion_offset(&self) -> usize {
        self.insertion_offset
    }

    /// Offset of the first character that is not part of the path, if any
    pub fn halted_at(&self) -> Option<usize> {
        self.halted_at
    }

    /// Whether the input continued past the end of the path expression
    pub fn is_halted(&self) -> bool {
        self.halted_at.is_some()
    }
}

/// Observer building a [`ParsedPath`] from automaton events
#[derive(Debug, Default)]
pub struct PathAccumulator {
    segments: Segments,
    buffer: String,
    last_entered_state: Option<&'static str>,
    last_state_char: Option<char>,
    candidate_index: usize,
    halted_at: Option<usize>,
}

impl PathAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completion insertion offset.
    ///
    /// Completions go after a structural delimiter, so the offset of a state
    /// entered on `.`, `[` or `]` is moved past that character.
    pub fn candidate_index(&self) -> usize {
        match self.last_state_char {
            Some('.' | '[' | ']') => self.candidate_index + 1,
            _ => self.candidate_index,
        }
    }

    /// Finish accumulation
    pub fn finish(self) -> ParsedPath {
        let insertion_offset = self.candidate_index();
        ParsedPath {
            segments: self.segments,
            fragment: self.buffer,
            position: PathPosition::from_state_id(self.last_entered_state),
            insertion_offset,
            halted_at: self.halted_at,
        }
    }

    fn is_name_separator(&self) -> bool {
        matches!(self.last_entered_state, Some(DOT_ID | OPEN_BRACKET_ID))
    }
}

impl ParsingObserver for PathAccumulator {
    fn entered_state(&mut self, ctx: &ParsingContext<'_>) -> Result<(), ParseError> {
        let previous = self.last_entered_state.replace(ctx.state().id());
        self.candidate_index = ctx.location();
        self.last_state_char = Some(ctx.character());

        trace!("entered '{}' {}", ctx.character(), ctx.state().id());

        // `a[1].b` has no name between `]` and `.`
        if previous != Some(CLOSE_BRACKET_ID) && self.is_name_separator() {
            if self.buffer.is_empty() {
                return Err(ParseError::MissingAttributeName {
                    separator: ctx.character(),
                    offset: ctx.location(),
                });
            }
            self.segments.push(std::mem::take(&mut self.buffer));
        }
        Ok(())
    }

    fn leaving_state(&mut self, ctx: &ParsingContext<'_>) -> Result<(), ParseError> {
        trace!("leaving '{}' {}", ctx.character(), ctx.state().id());

        // index digits never become part of the path
        if ctx.state().id() == LIST_INDEX_ID {
            self.buffer.clear();
        }
        Ok(())
    }

    fn character(&mut self, ctx: &ParsingContext<'_>) -> Result<(), ParseError> {
        trace!("char '{}' {}", ctx.character(), ctx.state().id());

        self.buffer.push(ctx.character());
        Ok(())
    }

    fn halted(&mut self, ctx: &ParsingContext<'_>) -> Result<(), ParseError> {
        trace!("halted at {} on '{}'", ctx.location(), ctx.character());

        self.halted_at = Some(ctx.location());
        Ok(())
    }
}
