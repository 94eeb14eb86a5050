//! Project aggregate and its validated name.

use super::{ProjectId, TrackerDomainError, text::bounded_trimmed};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique project name of 3 to 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::TextLength`] when the trimmed value is
    /// outside 3..=100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        bounded_trimmed("project name", value, 3, 100).map(Self)
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProjectName {
    type Error = TrackerDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProjectName> for String {
    fn from(value: ProjectName) -> Self {
        value.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-level container for epics, sprints and documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted project name.
    pub name: ProjectName,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            created_at: data.created_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A project that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    name: ProjectName,
    created_at: DateTime<Utc>,
}

impl NewProject {
    /// Prepares a project for insertion.
    #[must_use]
    pub fn new(name: ProjectName, clock: &impl Clock) -> Self {
        Self {
            name,
            created_at: clock.utc(),
        }
    }

    /// Returns the name the project will be stored with.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Materialises the project under the identity chosen by the store.
    #[must_use]
    pub fn into_project(self, id: ProjectId) -> Project {
        Project::from_persisted(PersistedProjectData {
            id,
            name: self.name,
            created_at: self.created_at,
        })
    }
}
