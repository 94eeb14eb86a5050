//! Service-level errors and their protocol-neutral classification.

use crate::tracker::{
    domain::{
        DocumentId, EpicId, InvalidTransition, ProjectId, ProjectName, SprintId, SprintName,
        SprintTransitionError, StoryId, TrackerDomainError,
    },
    ports::TrackerStoreError,
};
use std::fmt;
use thiserror::Error;

/// Result type for tracker service operations.
pub type TrackerServiceResult<T> = Result<T, TrackerServiceError>;

/// An entity that a request referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedEntity {
    /// A project.
    Project(ProjectId),
    /// An epic.
    Epic(EpicId),
    /// A story.
    Story(StoryId),
    /// A sprint.
    Sprint(SprintId),
    /// The membership record of a story in a sprint.
    Membership {
        /// Member story.
        story: StoryId,
        /// Containing sprint.
        sprint: SprintId,
    },
    /// A project document.
    Document(DocumentId),
}

impl fmt::Display for TrackedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project(id) => write!(f, "project {id}"),
            Self::Epic(id) => write!(f, "epic {id}"),
            Self::Story(id) => write!(f, "story {id}"),
            Self::Sprint(id) => write!(f, "sprint {id}"),
            Self::Membership { story, sprint } => {
                write!(f, "membership of story {story} in sprint {sprint}")
            }
            Self::Document(id) => write!(f, "document {id}"),
        }
    }
}

/// A request that contradicts the current state of the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerConflict {
    /// Project names are unique.
    #[error("project name '{0}' is already taken")]
    DuplicateProjectName(ProjectName),

    /// The story belongs to a different sprint that is active.
    #[error("story {story} is already in active sprint '{sprint_name}' ({sprint})")]
    InOtherActiveSprint {
        /// Story being placed.
        story: StoryId,
        /// Active sprint that already holds the story.
        sprint: SprintId,
        /// Name of that sprint.
        sprint_name: SprintName,
    },

    /// The story already has a membership record for the sprint.
    #[error("story {story} is already in this sprint ({sprint})")]
    AlreadyInSprint {
        /// Member story.
        story: StoryId,
        /// Target sprint.
        sprint: SprintId,
    },

    /// Member stories are still being worked on.
    #[error(
        "cannot close sprint {sprint}: stories still in progress or in review: {}",
        join_ids(.stories)
    )]
    OpenStories {
        /// Sprint being closed.
        sprint: SprintId,
        /// Stories in `in_progress` or `in_review`.
        stories: Vec<StoryId>,
    },

    /// The sprint has already been started.
    #[error("sprint {0} is already active")]
    SprintAlreadyActive(SprintId),

    /// Closed sprints are terminal.
    #[error("cannot start a closed sprint ({0})")]
    SprintClosed(SprintId),
}

fn join_ids(ids: &[StoryId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<SprintTransitionError> for TrackerConflict {
    fn from(err: SprintTransitionError) -> Self {
        match err {
            SprintTransitionError::AlreadyActive(id) => Self::SprintAlreadyActive(id),
            SprintTransitionError::Closed(id) => Self::SprintClosed(id),
        }
    }
}

/// Errors returned by [`super::TrackerService`].
#[derive(Debug, Error)]
pub enum TrackerServiceError {
    /// A referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(TrackedEntity),

    /// The request conflicts with existing state.
    #[error(transparent)]
    Conflict(TrackerConflict),

    /// A story status change skips a workflow stage.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    /// Input failed value validation.
    #[error(transparent)]
    Domain(#[from] TrackerDomainError),

    /// The entity store failed.
    #[error(transparent)]
    Store(TrackerStoreError),
}

impl From<TrackerConflict> for TrackerServiceError {
    fn from(conflict: TrackerConflict) -> Self {
        Self::Conflict(conflict)
    }
}

impl From<SprintTransitionError> for TrackerServiceError {
    fn from(err: SprintTransitionError) -> Self {
        Self::Conflict(err.into())
    }
}

impl From<TrackerStoreError> for TrackerServiceError {
    fn from(err: TrackerStoreError) -> Self {
        match err {
            TrackerStoreError::DuplicateProjectName(name) => {
                Self::Conflict(TrackerConflict::DuplicateProjectName(name))
            }
            TrackerStoreError::DuplicateMembership { story, sprint } => {
                Self::Conflict(TrackerConflict::AlreadyInSprint { story, sprint })
            }
            other => Self::Store(other),
        }
    }
}

/// Protocol-neutral classification of a service error.
///
/// Both transports map these onto their own status codes or error tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced entity does not exist.
    NotFound,
    /// A business rule rejected the request.
    Conflict,
    /// A story status change skips a workflow stage.
    InvalidTransition,
    /// A field value is malformed or out of range.
    Validation,
    /// Concurrent transactions collided; the request may be retried.
    Contention,
    /// Any other failure.
    Internal,
}

impl TrackerServiceError {
    /// Classifies the error for transport mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::InvalidTransition(_) => ErrorKind::InvalidTransition,
            Self::Domain(_) => ErrorKind::Validation,
            Self::Store(TrackerStoreError::Contention) => ErrorKind::Contention,
            Self::Store(_) => ErrorKind::Internal,
        }
    }
}
