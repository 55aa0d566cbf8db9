//! Custom prompt implementation for attrsh

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Custom prompt for the attrsh REPL
pub struct AttrPrompt {
    /// Current resource address
    address: String,
    /// Whether completion hides read-only attributes
    writable_only: bool,
}

impl AttrPrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `address` - Current resource address
    /// * `writable_only` - Whether writable-only completion is on
    ///
    /// # Returns
    /// * `Self` - New prompt
    pub fn new(address: String, writable_only: bool) -> Self {
        Self {
            address,
            writable_only,
        }
    }
}

impl Prompt for AttrPrompt {
    /// Render the left prompt (main prompt)
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        if self.writable_only {
            format!("[{} w]> ", self.address).into()
        } else {
            format!("[{}]> ", self.address).into()
        }
    }

    /// Render the right prompt (empty in our case)
    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    /// Render the prompt indicator (empty since it is part of the left prompt)
    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    /// Render the multiline prompt indicator
    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        "... ".into()
    }

    /// Render the history search prompt
    ///
    /// # Arguments
    /// * `history_search` - History search state
    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}
