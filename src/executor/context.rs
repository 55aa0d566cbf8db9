//! Execution context management
//!
//! This module provides the ExecutionContext which carries what commands act
//! on: the shared session state and the schema source.

use std::sync::Arc;

use tracing::{debug, warn};

use super::help::help_text;
use super::result::{ExecutionResult, ResultData};
use crate::error::{AttrshError, Result};
use crate::parser::{Command, parse_attribute_path};
use crate::repl::SharedState;
use crate::repl::completion::CompletionEngine;
use crate::schema::SchemaSource;

/// Execution context that maintains state across commands
#[derive(Clone)]
pub struct ExecutionContext {
    /// Shared state with REPL
    pub(crate) shared_state: SharedState,

    /// Where attribute descriptions come from
    source: Arc<dyn SchemaSource>,

    /// Completion engine used for attribute lookups
    engine: Arc<CompletionEngine>,
}

impl ExecutionContext {
    /// Create a new execution context
    ///
    /// # Arguments
    /// * `shared_state` - Shared state with REPL
    /// * `source` - Schema source
    ///
    /// # Returns
    /// * `Self` - New execution context
    pub fn new(shared_state: SharedState, source: Arc<dyn SchemaSource>) -> Self {
        let engine = CompletionEngine::with_source(Arc::clone(&source), shared_state.clone());
        Self {
            shared_state,
            source,
            engine: Arc::new(engine),
        }
    }

    /// Completion engine bound to this context's state and source
    pub fn engine(&self) -> Arc<CompletionEngine> {
        Arc::clone(&self.engine)
    }

    /// Execute a parsed command
    ///
    /// # Arguments
    /// * `command` - Command to execute
    ///
    /// # Returns
    /// * `Result<ExecutionResult>` - Execution result or error
    pub fn execute(&self, command: Command) -> Result<ExecutionResult> {
        debug!("Executing {:?}", command);

        match command {
            Command::Describe(path) => self.describe(path),
            Command::Cd(target) => self.change_address(&target),
            Command::Writable(enabled) => {
                self.shared_state.set_writable_only(enabled);
                let mode = if enabled { "on" } else { "off" };
                Ok(ExecutionResult::message(format!(
                    "Writable-only completion {}",
                    mode
                )))
            }
            Command::Reload => {
                self.source.invalidate();
                Ok(ExecutionResult::message("Schema cache cleared"))
            }
            Command::Help(topic) => Ok(ExecutionResult::message(help_text(topic.as_deref()))),
            Command::Exit => Ok(ExecutionResult::none()),
        }
    }

    fn describe(&self, path: String) -> Result<ExecutionResult> {
        // surfaces syntax errors with their offsets
        parse_attribute_path(&path)?;

        if self.engine.schema().is_none() {
            return Err(AttrshError::Generic(format!(
                "No attribute description for {}",
                self.shared_state.address()
            )));
        }

        match self.engine.describe(&path) {
            Some(descriptor) => Ok(ExecutionResult::success(ResultData::Attribute {
                path,
                descriptor,
            })),
            None => Err(AttrshError::Generic(format!("Unknown attribute: {}", path))),
        }
    }

    fn change_address(&self, target: &str) -> Result<ExecutionResult> {
        let address = self.shared_state.address().resolve(target)?;

        if self.source.fetch_schema(&address)?.is_none() {
            warn!("No attribute description for {}", address);
        }

        self.shared_state.set_address(address.clone());
        Ok(ExecutionResult::message(format!(
            "Current address: {}",
            address
        )))
    }
}
