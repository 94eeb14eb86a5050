//! Tagged errors returned to tool callers.

use crate::tracker::services::{ErrorKind, TrackerServiceError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Machine-readable error tag of a failed tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    /// A referenced entity does not exist.
    NotFound,
    /// A business rule rejected the call, or it collided with another write.
    Conflict,
    /// A story status change skips a workflow stage.
    InvalidTransition,
    /// Arguments are missing, malformed or out of range.
    InvalidArgument,
    /// No tool has the requested name.
    UnknownTool,
    /// Any other failure.
    Internal,
}

/// Failure of a tool call, serialized as `{"kind": ..., "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{kind:?}: {message}")]
pub struct ToolError {
    kind: ToolErrorKind,
    message: String,
}

impl ToolError {
    /// Creates a tool error.
    #[must_use]
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Rejects malformed arguments.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArgument, message)
    }

    /// Rejects an unknown tool name.
    #[must_use]
    pub fn unknown_tool(name: &str) -> Self {
        Self::new(ToolErrorKind::UnknownTool, format!("unknown tool: {name}"))
    }

    /// Returns the error tag.
    #[must_use]
    pub const fn kind(&self) -> ToolErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<TrackerServiceError> for ToolError {
    fn from(err: TrackerServiceError) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::new(ToolErrorKind::NotFound, err.to_string()),
            ErrorKind::Conflict => Self::new(ToolErrorKind::Conflict, err.to_string()),
            ErrorKind::InvalidTransition => {
                Self::new(ToolErrorKind::InvalidTransition, err.to_string())
            }
            ErrorKind::Validation => Self::invalid_argument(err.to_string()),
            ErrorKind::Contention => Self::new(
                ToolErrorKind::Conflict,
                "concurrent update detected, retry the call",
            ),
            ErrorKind::Internal => {
                error!(error = %err, "tool call failed");
                Self::new(ToolErrorKind::Internal, "internal error")
            }
        }
    }
}
