use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::warn;

use std::sync::Arc;

use crate::config::HistoryConfig;
use crate::error::{AttrshError, Result};
use crate::parser::{Command, Parser};

use super::completer::AttributePathCompleter;
use super::completion::CompletionEngine;
use super::highlighter::PathHighlighter;
use super::prompt::AttrPrompt;
use super::shared_state::SharedState;

const COMPLETION_MENU: &str = "completion_menu";

/// REPL engine for interactive command execution
pub struct ReplEngine {
    /// Line editor for command input
    editor: Reedline,

    /// Shared state with execution context
    shared_state: SharedState,

    /// Parser for command parsing
    parser: Parser,

    /// Whether to continue running
    running: bool,
}

impl ReplEngine {
    /// Create a new REPL engine with shared state
    ///
    /// # Arguments
    /// * `shared_state` - Shared state with execution context
    /// * `history_config` - History configuration
    /// * `highlighting_enabled` - Enable path highlighting
    /// * `completion_engine` - Engine used for tab completion
    ///
    /// # Returns
    /// * `Result<Self>` - New REPL engine or error
    pub fn new(
        shared_state: SharedState,
        history_config: &HistoryConfig,
        highlighting_enabled: bool,
        completion_engine: Arc<CompletionEngine>,
    ) -> Result<Self> {
        let completer = Box::new(AttributePathCompleter::new(completion_engine));
        let menu = Box::new(ColumnarMenu::default().with_name(COMPLETION_MENU));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let mut editor = Reedline::create()
            .with_completer(completer)
            .with_menu(ReedlineMenu::EngineCompleter(menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)))
            .with_highlighter(Box::new(PathHighlighter::new(highlighting_enabled)));

        // Load history if persistent
        if history_config.persist {
            match FileBackedHistory::with_file(
                history_config.max_size,
                history_config.file_path.clone(),
            ) {
                Ok(history) => editor = editor.with_history(Box::new(history)),
                Err(e) => warn!(
                    "Failed to open history file {}: {}",
                    history_config.file_path.display(),
                    e
                ),
            }
        }

        Ok(Self {
            editor,
            shared_state,
            parser: Parser::new(),
            running: true,
        })
    }

    /// Read a single line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line, empty on Ctrl-C, or None on Ctrl-D
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let prompt = self.generate_prompt();
        match self.editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => Ok(Some(line)),
            // Ctrl-C abandons the current line only
            Ok(Signal::CtrlC) => Ok(Some(String::new())),
            Ok(Signal::CtrlD) => {
                self.running = false;
                Ok(None)
            }
            #[allow(unreachable_patterns)]
            Ok(_) => Ok(Some(String::new())),
            Err(err) => Err(AttrshError::Generic(format!("Read error: {}", err))),
        }
    }

    /// Process user input and parse into command
    ///
    /// # Arguments
    /// * `input` - User input string
    ///
    /// # Returns
    /// * `Result<Command>` - Parsed command or error
    pub fn process_input(&mut self, input: &str) -> Result<Command> {
        let command = self.parser.parse(input)?;
        if command == Command::Exit {
            self.running = false;
        }
        Ok(command)
    }

    /// Check if REPL is still running
    ///
    /// # Returns
    /// * `bool` - True if running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Build the prompt from shared state
    fn generate_prompt(&self) -> AttrPrompt {
        AttrPrompt::new(
            self.shared_state.address().to_string(),
            self.shared_state.writable_only(),
        )
    }
}
