//! Request bodies and query parameters of the REST API.

use crate::{
    tracker::domain::{DocumentKind, Priority, WorkflowStatus},
    transport::deserialize_some,
};
use serde::Deserialize;
use uuid::Uuid;

/// Default page size of `GET /projects/{project_id}/stories`.
pub const REST_PAGE_LIMIT: usize = 50;

/// Body of `POST /projects`.
#[derive(Debug, Deserialize)]
pub struct CreateProjectBody {
    /// Unique project name.
    pub name: String,
}

/// Body of `POST /projects/{project_id}/epics`.
#[derive(Debug, Deserialize)]
pub struct CreateEpicBody {
    /// Epic title.
    pub title: String,
}

/// Body of `PUT /epics/{epic_id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEpicBody {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New status; not subject to the story workflow rule.
    #[serde(default)]
    pub status: Option<WorkflowStatus>,
}

/// Query of `GET /projects/{project_id}/epics`.
#[derive(Debug, Default, Deserialize)]
pub struct EpicQueryParams {
    /// Only epics with this status.
    pub status: Option<WorkflowStatus>,
    /// Only epics whose title contains this text.
    pub search: Option<String>,
}

/// Body of `POST /epics/{epic_id}/stories`.
#[derive(Debug, Deserialize)]
pub struct CreateStoryBody {
    /// Story title.
    pub title: String,
    /// Story description.
    pub description: String,
    /// Estimate.
    pub story_points: u8,
    /// Priority.
    pub priority: Priority,
}

/// Body of `PUT /stories/{story_id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStoryBody {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New estimate.
    #[serde(default)]
    pub story_points: Option<u8>,
    /// New priority.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Requested workflow status.
    #[serde(default)]
    pub status: Option<WorkflowStatus>,
    /// New assignee; `null` clears it.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub assigned_to: Option<Option<String>>,
}

/// Query of `GET /projects/{project_id}/stories`.
#[derive(Debug, Default, Deserialize)]
pub struct StoryQueryParams {
    /// Only stories with this status.
    pub status: Option<WorkflowStatus>,
    /// Only stories with this priority.
    pub priority: Option<Priority>,
    /// Only stories assigned to this person.
    pub assigned_to: Option<String>,
    /// Only stories placed in this sprint.
    pub sprint_id: Option<Uuid>,
    /// Only stories whose title or description contains this text.
    pub search: Option<String>,
    /// Number of matching stories to skip.
    pub offset: Option<usize>,
    /// Page size.
    pub limit: Option<usize>,
}

/// Body of `POST /projects/{project_id}/sprints`.
#[derive(Debug, Deserialize)]
pub struct CreateSprintBody {
    /// Sprint name.
    pub name: String,
}

/// Body of `POST /stories/{story_id}/comments` and
/// `POST /epics/{epic_id}/comments`.
#[derive(Debug, Deserialize)]
pub struct CommentBody {
    /// Comment text.
    pub text: String,
    /// Optional author.
    #[serde(default)]
    pub author: Option<String>,
}

/// Body of `POST /projects/{project_id}/documents`.
#[derive(Debug, Deserialize)]
pub struct CreateDocumentBody {
    /// Document kind.
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    /// Document body.
    pub content: String,
}

/// Body of `PUT /documents/{document_id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateDocumentBody {
    /// Replacement content.
    pub content: String,
}

/// Query of `GET /projects/{project_id}/documents`.
#[derive(Debug, Default, Deserialize)]
pub struct DocumentQueryParams {
    /// Only documents of this kind.
    #[serde(rename = "type")]
    pub kind: Option<DocumentKind>,
    /// Only documents whose content contains this text.
    pub search: Option<String>,
}
