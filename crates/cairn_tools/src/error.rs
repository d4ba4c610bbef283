//! Error types for tool execution.

use thiserror::Error;

/// Errors that can occur during tool execution.
///
/// The display text of a tool error is what the model sees after the
/// `error: ` prefix, so the parameter and execution variants render their
/// message verbatim.
#[derive(Debug, Error)]
pub enum ToolError {
    /// An argument was missing or had the wrong type.
    #[error("{0}")]
    ParameterError(String),

    /// Error during tool execution.
    #[error("{0}")]
    ExecutionError(String),

    /// A tool with the same name is already registered.
    #[error("tool '{0}' is already registered")]
    DuplicateTool(String),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ToolError {
    /// Creates a [`ParameterError`](Self::ParameterError).
    pub fn parameter_error(msg: impl Into<String>) -> Self {
        Self::ParameterError(msg.into())
    }

    /// Creates an [`ExecutionError`](Self::ExecutionError).
    pub fn execution_error(msg: impl Into<String>) -> Self {
        Self::ExecutionError(msg.into())
    }
}
