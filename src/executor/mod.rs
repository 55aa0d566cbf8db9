//! Command execution for attrsh
//!
//! This module provides the execution layer that processes parsed commands:
//! - Execution context carrying the session state and the schema source
//! - Result types handed to the formatter
//! - Help text for shell commands

mod context;
mod help;
mod result;

pub use context::ExecutionContext;
pub use help::help_text;
pub use result::{ExecutionResult, ResultData};
