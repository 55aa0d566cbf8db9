//! Execution result types
//!
//! This module defines the data structures for representing command execution results:
//! - ExecutionResult: Overall result of a command execution
//! - ResultData: Various types of data that can be returned

use crate::schema::AttributeDescriptor;

/// Result of command execution
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Success status
    pub success: bool,

    /// Result data
    pub data: ResultData,
}

/// Data returned from command execution
#[derive(Debug, Clone)]
pub enum ResultData {
    /// Description of one attribute
    Attribute {
        path: String,
        descriptor: AttributeDescriptor,
    },

    /// Text message
    Message(String),

    /// No data
    None,
}

impl ExecutionResult {
    /// Create a successful result
    pub fn success(data: ResultData) -> Self {
        Self {
            success: true,
            data,
        }
    }

    /// Create a result carrying a message
    pub fn message(msg: impl Into<String>) -> Self {
        Self::success(ResultData::Message(msg.into()))
    }

    /// Create an empty result
    pub fn none() -> Self {
        Self::success(ResultData::None)
    }
}
