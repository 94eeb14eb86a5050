//! Story workflow stages and the transition rule between them.

use super::{InvalidTransition, ParseWorkflowStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow stage shared by stories and epics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// Captured but not yet planned.
    Backlog,
    /// Planned and ready to be picked up.
    Todo,
    /// Being worked on.
    InProgress,
    /// Awaiting review.
    InReview,
    /// Finished.
    Done,
}

/// Workflow stages in their fixed order.
pub const WORKFLOW_ORDER: [WorkflowStatus; 5] = [
    WorkflowStatus::Backlog,
    WorkflowStatus::Todo,
    WorkflowStatus::InProgress,
    WorkflowStatus::InReview,
    WorkflowStatus::Done,
];

impl WorkflowStatus {
    /// Returns the position of this stage in [`WORKFLOW_ORDER`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Backlog => 0,
            Self::Todo => 1,
            Self::InProgress => 2,
            Self::InReview => 3,
            Self::Done => 4,
        }
    }

    /// Returns whether a story in this stage keeps its sprint open.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::InProgress | Self::InReview)
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for WorkflowStatus {
    type Error = ParseWorkflowStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "backlog" => Ok(Self::Backlog),
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "in_review" => Ok(Self::InReview),
            "done" => Ok(Self::Done),
            _ => Err(ParseWorkflowStatusError(value.to_owned())),
        }
    }
}

/// Checks that moving a story from `current` to `proposed` skips no stage.
///
/// Staying in place and advancing by exactly one stage are accepted. Moving
/// back to an earlier stage is not rejected either; only forward skips are.
///
/// # Errors
///
/// Returns [`InvalidTransition`] when `proposed` lies more than one stage
/// ahead of `current`.
pub const fn validate_transition(
    current: WorkflowStatus,
    proposed: WorkflowStatus,
) -> Result<(), InvalidTransition> {
    if proposed.index() > current.index() + 1 {
        return Err(InvalidTransition {
            from: current,
            to: proposed,
        });
    }
    Ok(())
}
