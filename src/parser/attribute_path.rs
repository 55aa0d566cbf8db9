//! Attribute path grammar
//!
//! States of the automaton recognising `name ('.' name | '[' digits ']')*`.
//!
//! `Dot`, `OpenBracket` and `CloseBracket` are single-character pivot states:
//! entering them is what tells the observer a name has ended, after which
//! control goes back to `Initial`, which re-reads the character that closed the
//! pivot and carries on.

use super::path::{ParsedPath, PathAccumulator};
use super::state_parser::{self, CharacterHandler, ParsingState};
use crate::error::ParseError;

pub const INITIAL_ID: &str = "INITVAL";
pub const ATTRIBUTE_NAME_ID: &str = "ATTR_NAME";
pub const DOT_ID: &str = "DOT";
pub const OPEN_BRACKET_ID: &str = "OPN_BR";
pub const LIST_INDEX_ID: &str = "LIST_IND";
pub const CLOSE_BRACKET_ID: &str = "CLS_BR";

const INDEX_EXPECTED: &str = "an index digit or ']'";

/// Characters allowed in an attribute name
pub fn is_attribute_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

fn is_path_char(c: char) -> bool {
    is_attribute_name_char(c) || matches!(c, '.' | '[' | ']')
}

fn is_index_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_close_bracket(c: char) -> bool {
    c == ']'
}

static ENTER_ATTRIBUTE_NAME: CharacterHandler = CharacterHandler::EnterState(&ATTRIBUTE_NAME);

static INITIAL_HANDLERS: [(char, CharacterHandler); 3] = [
    ('.', CharacterHandler::EnterState(&DOT)),
    ('[', CharacterHandler::EnterState(&OPEN_BRACKET)),
    (
        ']',
        CharacterHandler::Reject {
            expected: "an attribute name, '.' or '['",
        },
    ),
];

/// Start state; also the state every pivot returns to
pub static INITIAL: ParsingState = ParsingState::new(
    INITIAL_ID,
    CharacterHandler::Classify {
        accept: is_attribute_name_char,
        matched: &ENTER_ATTRIBUTE_NAME,
        otherwise: &CharacterHandler::Halt,
    },
)
.with_handlers(&INITIAL_HANDLERS)
.on_return(CharacterHandler::Classify {
    accept: is_path_char,
    matched: &CharacterHandler::Dispatch,
    otherwise: &CharacterHandler::Halt,
});

/// Collects the characters of one attribute name
pub static ATTRIBUTE_NAME: ParsingState = ParsingState::new(
    ATTRIBUTE_NAME_ID,
    CharacterHandler::Classify {
        accept: is_attribute_name_char,
        matched: &CharacterHandler::Word { escape: false },
        otherwise: &CharacterHandler::LeaveState,
    },
)
.on_enter(CharacterHandler::Dispatch);

pub static DOT: ParsingState = ParsingState::new(DOT_ID, CharacterHandler::LeaveState);

pub static OPEN_BRACKET: ParsingState =
    ParsingState::new(OPEN_BRACKET_ID, CharacterHandler::EnterState(&LIST_INDEX))
        .on_return(CharacterHandler::LeaveState);

static LIST_INDEX_HANDLERS: [(char, CharacterHandler); 1] =
    [(']', CharacterHandler::EnterState(&CLOSE_BRACKET))];

// `[]`: the `]` that opened the index is accepted and swallowed
static LIST_INDEX_ENTERED_ON_OTHER: CharacterHandler = CharacterHandler::Classify {
    accept: is_close_bracket,
    matched: &CharacterHandler::Noop,
    otherwise: &CharacterHandler::Reject {
        expected: INDEX_EXPECTED,
    },
};

/// Digits between `[` and `]`; never promoted to a path segment
pub static LIST_INDEX: ParsingState = ParsingState::new(
    LIST_INDEX_ID,
    CharacterHandler::Classify {
        accept: is_index_digit,
        matched: &CharacterHandler::Word { escape: false },
        otherwise: &CharacterHandler::Reject {
            expected: INDEX_EXPECTED,
        },
    },
)
.with_handlers(&LIST_INDEX_HANDLERS)
.on_enter(CharacterHandler::Classify {
    accept: is_index_digit,
    matched: &CharacterHandler::Word { escape: false },
    otherwise: &LIST_INDEX_ENTERED_ON_OTHER,
})
.on_return(CharacterHandler::LeaveState);

pub static CLOSE_BRACKET: ParsingState =
    ParsingState::new(CLOSE_BRACKET_ID, CharacterHandler::LeaveState);

/// Parse an attribute path expression
///
/// # Arguments
/// * `input` - Path text typed so far, e.g. `foo.bar[2].ba`
///
/// # Returns
/// * `Result<ParsedPath, ParseError>` - Parsed path or the first syntax error
pub fn parse_attribute_path(input: &str) -> Result<ParsedPath, ParseError> {
    let mut accumulator = PathAccumulator::new();
    state_parser::parse(input, &INITIAL, &mut accumulator)?;
    Ok(accumulator.finish())
}
