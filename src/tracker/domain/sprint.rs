//! Sprint aggregate, its one-way lifecycle, and story membership records.

use super::{
    ParseSprintStatusError, ProjectId, SprintId, SprintTransitionError, StoryId,
    TrackerDomainError, text::bounded_trimmed,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sprint lifecycle state: `planning` → `active` → `closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprintStatus {
    /// Being prepared; not started yet.
    Planning,
    /// Running.
    Active,
    /// Finished. Terminal.
    Closed,
}

impl SprintStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SprintStatus {
    type Error = ParseSprintStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "planning" => Ok(Self::Planning),
            "active" => Ok(Self::Active),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseSprintStatusError(value.to_owned())),
        }
    }
}

/// Sprint name of 3 to 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SprintName(String);

impl SprintName {
    /// Creates a validated sprint name.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::TextLength`] when the trimmed value is
    /// outside 3..=100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        bounded_trimmed("sprint name", value, 3, 100).map(Self)
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SprintName {
    type Error = TrackerDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SprintName> for String {
    fn from(value: SprintName) -> Self {
        value.0
    }
}

impl fmt::Display for SprintName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sprint aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    id: SprintId,
    project_id: ProjectId,
    name: SprintName,
    status: SprintStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSprintData {
    /// Persisted sprint identifier.
    pub id: SprintId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted name.
    pub name: SprintName,
    /// Persisted lifecycle state.
    pub status: SprintStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Sprint {
    /// Reconstructs a sprint from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSprintData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn id(&self) -> SprintId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the sprint name.
    #[must_use]
    pub const fn name(&self) -> &SprintName {
        &self.name
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn status(&self) -> SprintStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves a planned sprint to `active`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintTransitionError::AlreadyActive`] or
    /// [`SprintTransitionError::Closed`] when the sprint is not in planning.
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), SprintTransitionError> {
        match self.status {
            SprintStatus::Planning => {
                self.status = SprintStatus::Active;
                self.updated_at = clock.utc();
                Ok(())
            }
            SprintStatus::Active => Err(SprintTransitionError::AlreadyActive(self.id)),
            SprintStatus::Closed => Err(SprintTransitionError::Closed(self.id)),
        }
    }

    /// Moves the sprint to `closed`.
    ///
    /// Closure preconditions on member stories are checked by the caller,
    /// which can see membership records.
    pub fn close(&mut self, clock: &impl Clock) {
        self.status = SprintStatus::Closed;
        self.updated_at = clock.utc();
    }
}

/// A sprint that has not been stored yet. Sprints start in planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSprint {
    project_id: ProjectId,
    name: SprintName,
    created_at: DateTime<Utc>,
}

impl NewSprint {
    /// Prepares a sprint for insertion.
    #[must_use]
    pub fn new(project_id: ProjectId, name: SprintName, clock: &impl Clock) -> Self {
        Self {
            project_id,
            name,
            created_at: clock.utc(),
        }
    }

    /// Materialises the sprint under the identity chosen by the store.
    #[must_use]
    pub fn into_sprint(self, id: SprintId) -> Sprint {
        Sprint::from_persisted(PersistedSprintData {
            id,
            project_id: self.project_id,
            name: self.name,
            status: SprintStatus::Planning,
            created_at: self.created_at,
            updated_at: self.created_at,
        })
    }
}

/// The fact that a story was, or is, part of a sprint.
///
/// At most one record exists per (story, sprint) pair; a story can collect
/// records for several sprints over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintMembership {
    story_id: StoryId,
    sprint_id: SprintId,
    added_at: DateTime<Utc>,
}

impl SprintMembership {
    /// Records that `story_id` joined `sprint_id` now.
    #[must_use]
    pub fn new(story_id: StoryId, sprint_id: SprintId, clock: &impl Clock) -> Self {
        Self::from_persisted(story_id, sprint_id, clock.utc())
    }

    /// Reconstructs a membership record from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        story_id: StoryId,
        sprint_id: SprintId,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            story_id,
            sprint_id,
            added_at,
        }
    }

    /// Returns the member story.
    #[must_use]
    pub const fn story_id(&self) -> StoryId {
        self.story_id
    }

    /// Returns the containing sprint.
    #[must_use]
    pub const fn sprint_id(&self) -> SprintId {
        self.sprint_id
    }

    /// Returns when the story joined the sprint.
    #[must_use]
    pub const fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }
}
