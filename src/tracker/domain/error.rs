//! Error types for tracker domain validation and parsing.

use super::{SprintId, WorkflowStatus};
use thiserror::Error;

/// Errors returned while constructing tracker domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerDomainError {
    /// A text field is shorter or longer than its allowed range.
    #[error("{field} must be between {min} and {max} characters, got {actual}")]
    TextLength {
        /// Name of the offending field.
        field: &'static str,
        /// Minimum accepted length in characters.
        min: usize,
        /// Maximum accepted length in characters.
        max: usize,
        /// Observed length in characters.
        actual: usize,
    },

    /// Story points outside the accepted estimation scale.
    #[error("invalid story points {0}, expected one of 0, 1, 2, 3, 5, 8, 13")]
    InvalidStoryPoints(u8),

    /// Document content is empty after trimming.
    #[error("document content must not be empty")]
    EmptyDocumentContent,
}

/// A story status change that skips at least one workflow stage.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid status transition from {from} to {to} (workflow step cannot be skipped)")]
pub struct InvalidTransition {
    /// Status the story currently has.
    pub from: WorkflowStatus,
    /// Status that was requested.
    pub to: WorkflowStatus,
}

/// Sprint lifecycle moves rejected by the sprint aggregate.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SprintTransitionError {
    /// The sprint has already been started.
    #[error("sprint {0} is already active")]
    AlreadyActive(SprintId),

    /// Closed sprints are terminal.
    #[error("cannot start a closed sprint ({0})")]
    Closed(SprintId),
}

/// Error returned while parsing workflow statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown workflow status: {0}")]
pub struct ParseWorkflowStatusError(pub String);

/// Error returned while parsing story priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing sprint statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sprint status: {0}")]
pub struct ParseSprintStatusError(pub String);

/// Error returned while parsing document kinds.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown document type: {0}")]
pub struct ParseDocumentKindError(pub String);
