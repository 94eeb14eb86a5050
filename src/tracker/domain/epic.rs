//! Epic aggregate: a group of related stories under a project.

use super::{EpicId, ProjectId, Title, WorkflowStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Epic aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epic {
    id: EpicId,
    project_id: ProjectId,
    title: Title,
    status: WorkflowStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted epic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEpicData {
    /// Persisted epic identifier.
    pub id: EpicId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: Title,
    /// Persisted workflow status.
    pub status: WorkflowStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial epic update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpicPatch {
    /// Replacement title.
    pub title: Option<Title>,
    /// Replacement status. Epic status is not bound to the story workflow.
    pub status: Option<WorkflowStatus>,
}

impl Epic {
    /// Reconstructs an epic from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedEpicData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the epic identifier.
    #[must_use]
    pub const fn id(&self) -> EpicId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> WorkflowStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies the fields present in `patch`.
    pub fn apply(&mut self, patch: EpicPatch, clock: &impl Clock) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = clock.utc();
    }
}

/// An epic that has not been stored yet. Epics start in the backlog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEpic {
    project_id: ProjectId,
    title: Title,
    created_at: DateTime<Utc>,
}

impl NewEpic {
    /// Prepares an epic for insertion.
    #[must_use]
    pub fn new(project_id: ProjectId, title: Title, clock: &impl Clock) -> Self {
        Self {
            project_id,
            title,
            created_at: clock.utc(),
        }
    }

    /// Materialises the epic under the identity chosen by the store.
    #[must_use]
    pub fn into_epic(self, id: EpicId) -> Epic {
        Epic::from_persisted(PersistedEpicData {
            id,
            project_id: self.project_id,
            title: self.title,
            status: WorkflowStatus::Backlog,
            created_at: self.created_at,
            updated_at: self.created_at,
        })
    }
}

/// Optional constraints when listing the epics of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpicFilter {
    /// Only epics with this status.
    pub status: Option<WorkflowStatus>,
    /// Only epics whose title contains this text.
    pub search: Option<String>,
}

impl EpicFilter {
    /// Returns whether `epic` satisfies every constraint of the filter.
    #[must_use]
    pub fn matches(&self, epic: &Epic) -> bool {
        self.status.is_none_or(|status| epic.status == status)
            && self
                .search
                .as_deref()
                .is_none_or(|needle| epic.title.as_str().contains(needle))
    }
}
