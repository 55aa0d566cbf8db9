//! Character-driven state machine
//!
//! This module implements a small, reusable automaton that walks its input one
//! character at a time. The machine is:
//! - Single pass (left to right, no backtracking)
//! - Nestable (entering a state pushes it, leaving pops back to the caller)
//! - Observable (an observer receives `entered_state`, `character` and
//!   `leaving_state` events and builds whatever result it needs)
//!
//! States are plain data and are meant to be declared as `static` items, so a
//! grammar is built once and shared by every parse. All per-parse data lives in
//! [`ParsingContext`], which is created and dropped by [`parse`].

use std::fmt;

use crate::error::ParseError;

/// What a state does with the current character
#[derive(Debug, Clone, Copy)]
pub enum CharacterHandler {
    /// Ignore the character
    Noop,

    /// Push a nested state. The nested state's enter handler sees the same character.
    EnterState(&'static ParsingState),

    /// Report the character to the observer as part of a word.
    ///
    /// With `escape` set, a backslash is swallowed and the next character is
    /// reported as a word character whatever the active state would do with it.
    Word { escape: bool },

    /// Pop the active state. The caller's return handler sees the same character.
    LeaveState,

    /// Look the character up again in the active state's handler table
    Dispatch,

    /// Pick one of two handlers depending on the character
    Classify {
        accept: fn(char) -> bool,
        matched: &'static CharacterHandler,
        otherwise: &'static CharacterHandler,
    },

    /// Fail the parse at the current character
    Reject { expected: &'static str },

    /// Stop consuming input; the rest of the text is not part of the expression
    Halt,
}

/// A named node of the automaton
pub struct ParsingState {
    id: &'static str,
    default_handler: CharacterHandler,
    handlers: &'static [(char, CharacterHandler)],
    enter_handler: CharacterHandler,
    return_handler: CharacterHandler,
    requires_termination: bool,
}

impl ParsingState {
    /// Create a state with a default handler and no-op hooks
    pub const fn new(id: &'static str, default_handler: CharacterHandler) -> Self {
        Self {
            id,
            default_handler,
            handlers: &[],
            enter_handler: CharacterHandler::Noop,
            return_handler: CharacterHandler::Noop,
            requires_termination: false,
        }
    }

    /// Handlers for specific trigger characters, checked before the default
    pub const fn with_handlers(mut self, handlers: &'static [(char, CharacterHandler)]) -> Self {
        self.handlers = handlers;
        self
    }

    /// Handler run right after the state has been entered
    pub const fn on_enter(mut self, handler: CharacterHandler) -> Self {
        self.enter_handler = handler;
        self
    }

    /// Handler run when a nested state returns into this one
    pub const fn on_return(mut self, handler: CharacterHandler) -> Self {
        self.return_handler = handler;
        self
    }

    /// Make end of input inside this state a parse error
    pub const fn terminated(mut self) -> Self {
        self.requires_termination = true;
        self
    }

    /// State identifier
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Handler for a character: the trigger table first, then the default
    pub fn handler(&self, ch: char) -> CharacterHandler {
        self.handlers
            .iter()
            .find(|(trigger, _)| *trigger == ch)
            .map(|(_, handler)| *handler)
            .unwrap_or(self.default_handler)
    }
}

impl fmt::Debug for ParsingState {
    // States reference each other, so only the id is printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParsingState").field(&self.id).finish()
    }
}

impl PartialEq for ParsingState {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Receives automaton events during a parse
pub trait ParsingObserver {
    /// A state has just been pushed; `ctx.state()` is the new state
    fn entered_state(&mut self, ctx: &ParsingContext<'_>) -> Result<(), ParseError>;

    /// A state is about to be popped; `ctx.state()` is still the leaving state
    fn leaving_state(&mut self, ctx: &ParsingContext<'_>) -> Result<(), ParseError>;

    /// A word character has been consumed
    fn character(&mut self, ctx: &ParsingContext<'_>) -> Result<(), ParseError>;

    /// Parsing stopped before the end of the input
    fn halted(&mut self, _ctx: &ParsingContext<'_>) -> Result<(), ParseError> {
        Ok(())
    }
}

/// Parse-scoped cursor over the input
#[derive(Debug)]
pub struct ParsingContext<'a> {
    input: &'a str,
    initial: &'static ParsingState,
    stack: Vec<&'static ParsingState>,
    location: usize,
    character: char,
    end_of_content: bool,
    escaped: bool,
    halted: bool,
}

impl<'a> ParsingContext<'a> {
    fn new(input: &'a str, initial: &'static ParsingState) -> Self {
        Self {
            input,
            initial,
            stack: vec![initial],
            location: 0,
            character: '\0',
            end_of_content: input.is_empty(),
            escaped: false,
            halted: false,
        }
    }

    /// Byte offset of the current character
    pub fn location(&self) -> usize {
        self.location
    }

    /// The current character
    pub fn character(&self) -> char {
        self.character
    }

    /// Whether all input has been consumed
    pub fn is_end_of_content(&self) -> bool {
        self.end_of_content
    }

    /// The active (innermost) state
    pub fn state(&self) -> &'static ParsingState {
        self.stack.last().copied().unwrap_or(self.initial)
    }

    fn handle<O>(&mut self, handler: CharacterHandler, observer: &mut O) -> Result<(), ParseError>
    where
        O: ParsingObserver + ?Sized,
    {
        if self.halted {
            return Ok(());
        }

        match handler {
            CharacterHandler::Noop => Ok(()),
            CharacterHandler::EnterState(state) => self.enter_state(state, observer),
            CharacterHandler::Word { escape } => {
                if escape && self.character == '\\' {
                    self.escaped = true;
                    Ok(())
                } else {
                    observer.character(self)
                }
            }
            CharacterHandler::LeaveState => self.leave_state(observer),
            CharacterHandler::Dispatch => match self.state().handler(self.character) {
                // a table entry pointing back at itself would never terminate
                CharacterHandler::Dispatch => Ok(()),
                next => self.handle(next, observer),
            },
            CharacterHandler::Classify {
                accept,
                matched,
                otherwise,
            } => {
                let next = if accept(self.character) {
                    *matched
                } else {
                    *otherwise
                };
                self.handle(next, observer)
            }
            CharacterHandler::Reject { expected } => Err(ParseError::UnexpectedCharacter {
                character: self.character,
                offset: self.location,
                expected,
            }),
            CharacterHandler::Halt => {
                self.halted = true;
                Ok(())
            }
        }
    }

    fn enter_state<O>(&mut self, state: &'static ParsingState, observer: &mut O) -> Result<(), ParseError>
    where
        O: ParsingObserver + ?Sized,
    {
        self.stack.push(state);
        observer.entered_state(self)?;
        self.handle(state.enter_handler, observer)
    }

    fn leave_state<O>(&mut self, observer: &mut O) -> Result<(), ParseError>
    where
        O: ParsingObserver + ?Sized,
    {
        // the initial state is never left
        if self.stack.len() <= 1 {
            return Ok(());
        }

        observer.leaving_state(self)?;
        self.stack.pop();

        if self.end_of_content {
            return Ok(());
        }
        let handler = self.state().return_handler;
        self.handle(handler, observer)
    }

    fn finish<O>(&mut self, observer: &mut O) -> Result<(), ParseError>
    where
        O: ParsingObserver + ?Sized,
    {
        self.end_of_content = true;
        self.location = self.input.len();

        while self.stack.len() > 1 {
            let state = self.state();
            if state.requires_termination {
                return Err(ParseError::Unterminated {
                    state: state.id,
                    offset: self.location,
                });
            }
            self.leave_state(observer)?;
        }
        Ok(())
    }
}

/// Run the automaton over `input` starting in `initial`
///
/// # Arguments
/// * `input` - Text to parse
/// * `initial` - Root state; it stays at the bottom of the state stack
/// * `observer` - Receives the parse events
///
/// # Returns
/// * `Result<(), ParseError>` - The first error raised by a handler or the observer
pub fn parse<O>(input: &str, initial: &'static ParsingState, observer: &mut O) -> Result<(), ParseError>
where
    O: ParsingObserver + ?Sized,
{
    let mut ctx = ParsingContext::new(input, initial);

    for (location, character) in input.char_indices() {
        ctx.location = location;
        ctx.character = character;

        let handler = if std::mem::take(&mut ctx.escaped) {
            CharacterHandler::Word { escape: false }
        } else {
            ctx.state().handler(character)
        };
        ctx.handle(handler, observer)?;

        if ctx.halted {
            return observer.halted(&ctx);
        }
    }

    ctx.finish(observer)
}
