//! Request payloads accepted by the tracker service.
//!
//! Text fields arrive unvalidated and are checked by the service, so that
//! every transport reports field errors the same way. Closed enumerations
//! (status, priority, document kind) are parsed by the transport.

use crate::tracker::domain::{
    CommentTarget, DocumentKind, EpicId, Priority, ProjectId, Story, StoryFilter, WorkflowStatus,
};

/// Default page size for story listings.
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// Largest page size a story listing will return.
pub const MAX_PAGE_LIMIT: usize = 100;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    pub(super) name: String,
}

impl CreateProjectRequest {
    /// Creates a request for a project with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Request payload for creating an epic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEpicRequest {
    pub(super) project_id: ProjectId,
    pub(super) title: String,
}

impl CreateEpicRequest {
    /// Creates a request for an epic in `project_id`.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
        }
    }
}

/// Partial update of an epic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateEpicRequest {
    pub(super) title: Option<String>,
    pub(super) status: Option<WorkflowStatus>,
}

impl UpdateEpicRequest {
    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new status.
    #[must_use]
    pub const fn with_status(mut self, status: WorkflowStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Request payload for creating a story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStoryRequest {
    pub(super) epic_id: EpicId,
    pub(super) title: String,
    pub(super) description: String,
    pub(super) points: u8,
    pub(super) priority: Priority,
}

impl CreateStoryRequest {
    /// Creates a request for a story in `epic_id`.
    ///
    /// Points default to 0 and priority to [`Priority::Medium`].
    #[must_use]
    pub fn new(epic_id: EpicId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            epic_id,
            title: title.into(),
            description: description.into(),
            points: 0,
            priority: Priority::default(),
        }
    }

    /// Sets the estimate.
    #[must_use]
    pub const fn with_points(mut self, points: u8) -> Self {
        self.points = points;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Partial update of a story.
///
/// Absent fields are left unchanged. The assignee distinguishes "leave as
/// is" from "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateStoryRequest {
    pub(super) title: Option<String>,
    pub(super) description: Option<String>,
    pub(super) points: Option<u8>,
    pub(super) priority: Option<Priority>,
    pub(super) status: Option<WorkflowStatus>,
    pub(super) assignee: Option<Option<String>>,
}

impl UpdateStoryRequest {
    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new estimate.
    #[must_use]
    pub const fn with_points(mut self, points: u8) -> Self {
        self.points = Some(points);
        self
    }

    /// Sets a new priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Requests a workflow status change.
    #[must_use]
    pub const fn with_status(mut self, status: WorkflowStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Assigns the story to someone.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(Some(assignee.into()));
        self
    }

    /// Removes the current assignee.
    #[must_use]
    pub fn clear_assignee(mut self) -> Self {
        self.assignee = Some(None);
        self
    }

    /// Sets or clears the assignee.
    #[must_use]
    pub fn with_assignee_change(mut self, assignee: Option<String>) -> Self {
        self.assignee = Some(assignee);
        self
    }
}

/// A filtered, paginated story listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStoriesRequest {
    pub(super) project_id: ProjectId,
    pub(super) filter: StoryFilter,
    pub(super) offset: usize,
    pub(super) limit: usize,
}

impl ListStoriesRequest {
    /// Lists the first page of every story in the project.
    #[must_use]
    pub fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            filter: StoryFilter::default(),
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Restricts the listing.
    #[must_use]
    pub fn with_filter(mut self, filter: StoryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Selects a page. The limit is clamped to `1..=MAX_PAGE_LIMIT`.
    #[must_use]
    pub fn with_page(mut self, offset: usize, limit: usize) -> Self {
        self.offset = offset;
        self.limit = limit.clamp(1, MAX_PAGE_LIMIT);
        self
    }
}

/// One page of a story listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryPage {
    /// Stories on this page, oldest first.
    pub stories: Vec<Story>,
    /// Number of stories matching the filter across all pages.
    pub total: usize,
    /// Offset of the first story on this page.
    pub offset: usize,
    /// Requested page size.
    pub limit: usize,
}

/// Request payload for creating a sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSprintRequest {
    pub(super) project_id: ProjectId,
    pub(super) name: String,
}

impl CreateSprintRequest {
    /// Creates a request for a sprint in `project_id`.
    #[must_use]
    pub fn new(project_id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            project_id,
            name: name.into(),
        }
    }
}

/// Request payload for commenting on a story or an epic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommentRequest {
    pub(super) target: CommentTarget,
    pub(super) text: String,
    pub(super) author: Option<String>,
}

impl AddCommentRequest {
    /// Creates an anonymous comment on `target`.
    #[must_use]
    pub fn new(target: CommentTarget, text: impl Into<String>) -> Self {
        Self {
            target,
            text: text.into(),
            author: None,
        }
    }

    /// Attributes the comment.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// Request payload for creating a project document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDocumentRequest {
    pub(super) project_id: ProjectId,
    pub(super) kind: DocumentKind,
    pub(super) content: String,
}

impl CreateDocumentRequest {
    /// Creates a request for a document in `project_id`.
    #[must_use]
    pub fn new(project_id: ProjectId, kind: DocumentKind, content: impl Into<String>) -> Self {
        Self {
            project_id,
            kind,
            content: content.into(),
        }
    }
}

