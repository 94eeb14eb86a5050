//! Domain model for the tracker.
//!
//! Entities are reconstructed from persisted data by the store; the domain
//! never generates identities itself. Values with length or membership rules
//! are validated once, when they are constructed at the system boundary.

mod comment;
mod document;
mod epic;
mod error;
mod ids;
mod project;
mod sprint;
mod story;
mod text;
mod workflow;

pub use comment::{
    Comment, CommentAuthor, CommentTarget, CommentText, NewComment, PersistedCommentData,
};
pub use document::{Document, DocumentFilter, DocumentKind, NewDocument, PersistedDocumentData};
pub use epic::{Epic, EpicFilter, EpicPatch, NewEpic, PersistedEpicData};
pub use error::{
    InvalidTransition, ParseDocumentKindError, ParsePriorityError, ParseSprintStatusError,
    ParseWorkflowStatusError, SprintTransitionError, TrackerDomainError,
};
pub use ids::{CommentId, DocumentId, EpicId, ProjectId, SprintId, StoryId};
pub use project::{NewProject, PersistedProjectData, Project, ProjectName};
pub use sprint::{
    NewSprint, PersistedSprintData, Sprint, SprintMembership, SprintName, SprintStatus,
};
pub use story::{
    Assignee, NewStory, PersistedStoryData, Priority, Story, StoryDescription, StoryFilter,
    StoryPatch, StoryPoints,
};
pub use text::Title;
pub use workflow::{WORKFLOW_ORDER, WorkflowStatus, validate_transition};
