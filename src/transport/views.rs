//! JSON representations of tracker entities shared by every transport.

use crate::tracker::{
    domain::{
        Comment, CommentTarget, Document, DocumentKind, Epic, Priority, Project, Sprint,
        SprintMembership, SprintStatus, Story, WorkflowStatus,
    },
    services::StoryPage,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Project as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectView {
    /// Project identifier.
    pub id: Uuid,
    /// Unique project name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id().into_inner(),
            name: project.name().as_str().to_owned(),
            created_at: project.created_at(),
        }
    }
}

/// Epic as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpicView {
    /// Epic identifier.
    pub id: Uuid,
    /// Owning project.
    pub project_id: Uuid,
    /// Epic title.
    pub title: String,
    /// Workflow status.
    pub status: WorkflowStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Epic> for EpicView {
    fn from(epic: &Epic) -> Self {
        Self {
            id: epic.id().into_inner(),
            project_id: epic.project_id().into_inner(),
            title: epic.title().as_str().to_owned(),
            status: epic.status(),
            created_at: epic.created_at(),
            updated_at: epic.updated_at(),
        }
    }
}

/// Story as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryView {
    /// Story identifier.
    pub id: Uuid,
    /// Owning epic.
    pub epic_id: Uuid,
    /// Story title.
    pub title: String,
    /// Story description.
    pub description: String,
    /// Estimate.
    pub story_points: u8,
    /// Priority.
    pub priority: Priority,
    /// Workflow status.
    pub status: WorkflowStatus,
    /// Current assignee, if any.
    pub assigned_to: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Story> for StoryView {
    fn from(story: &Story) -> Self {
        Self {
            id: story.id().into_inner(),
            epic_id: story.epic_id().into_inner(),
            title: story.title().as_str().to_owned(),
            description: story.description().as_str().to_owned(),
            story_points: story.points().value(),
            priority: story.priority(),
            status: story.status(),
            assigned_to: story.assignee().map(|assignee| assignee.as_str().to_owned()),
            created_at: story.created_at(),
            updated_at: story.updated_at(),
        }
    }
}

/// One page of a story listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryPageView {
    /// Stories on this page.
    pub stories: Vec<StoryView>,
    /// Number of matching stories across all pages.
    pub total: usize,
    /// Offset of the first story on this page.
    pub offset: usize,
    /// Page size.
    pub limit: usize,
}

impl From<&StoryPage> for StoryPageView {
    fn from(page: &StoryPage) -> Self {
        Self {
            stories: page.stories.iter().map(StoryView::from).collect(),
            total: page.total,
            offset: page.offset,
            limit: page.limit,
        }
    }
}

/// Sprint as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SprintView {
    /// Sprint identifier.
    pub id: Uuid,
    /// Owning project.
    pub project_id: Uuid,
    /// Sprint name.
    pub name: String,
    /// Lifecycle state.
    pub status: SprintStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last lifecycle change.
    pub updated_at: DateTime<Utc>,
}

impl From<&Sprint> for SprintView {
    fn from(sprint: &Sprint) -> Self {
        Self {
            id: sprint.id().into_inner(),
            project_id: sprint.project_id().into_inner(),
            name: sprint.name().as_str().to_owned(),
            status: sprint.status(),
            created_at: sprint.created_at(),
            updated_at: sprint.updated_at(),
        }
    }
}

/// Membership of a story in a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MembershipView {
    /// Member story.
    pub story_id: Uuid,
    /// Containing sprint.
    pub sprint_id: Uuid,
    /// When the story was added.
    pub added_at: DateTime<Utc>,
}

impl From<&SprintMembership> for MembershipView {
    fn from(membership: &SprintMembership) -> Self {
        Self {
            story_id: membership.story_id().into_inner(),
            sprint_id: membership.sprint_id().into_inner(),
            added_at: membership.added_at(),
        }
    }
}

/// Comment as returned to clients. Exactly one of the target ids is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    /// Comment identifier.
    pub id: Uuid,
    /// Commented story.
    pub story_id: Option<Uuid>,
    /// Commented epic.
    pub epic_id: Option<Uuid>,
    /// Comment body.
    pub text: String,
    /// Author, if given.
    pub author: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        let (story_id, epic_id) = match comment.target() {
            CommentTarget::Story(id) => (Some(id.into_inner()), None),
            CommentTarget::Epic(id) => (None, Some(id.into_inner())),
        };
        Self {
            id: comment.id().into_inner(),
            story_id,
            epic_id,
            text: comment.text().as_str().to_owned(),
            author: comment.author().map(|author| author.as_str().to_owned()),
            created_at: comment.created_at(),
        }
    }
}

/// Document as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentView {
    /// Document identifier.
    pub id: Uuid,
    /// Owning project.
    pub project_id: Uuid,
    /// Document kind.
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    /// Document body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Document> for DocumentView {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id().into_inner(),
            project_id: document.project_id().into_inner(),
            kind: document.kind(),
            content: document.content().to_owned(),
            created_at: document.created_at(),
            updated_at: document.updated_at(),
        }
    }
}
