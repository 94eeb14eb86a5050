//! Project documents such as problem statements and retrospectives.

use super::{DocumentId, ParseDocumentKindError, ProjectId, TrackerDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of project document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Problem statement.
    Problem,
    /// Product vision.
    Vision,
    /// Technical decision record.
    Tdr,
    /// Sprint retrospective.
    Retrospective,
}

impl DocumentKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Problem => "problem",
            Self::Vision => "vision",
            Self::Tdr => "tdr",
            Self::Retrospective => "retrospective",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DocumentKind {
    type Error = ParseDocumentKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "problem" => Ok(Self::Problem),
            "vision" => Ok(Self::Vision),
            "tdr" => Ok(Self::Tdr),
            "retrospective" => Ok(Self::Retrospective),
            _ => Err(ParseDocumentKindError(value.to_owned())),
        }
    }
}

/// A document attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    project_id: ProjectId,
    kind: DocumentKind,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDocumentData {
    /// Persisted document identifier.
    pub id: DocumentId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted kind.
    pub kind: DocumentKind,
    /// Persisted content.
    pub content: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

fn checked_content(content: String) -> Result<String, TrackerDomainError> {
    if content.trim().is_empty() {
        return Err(TrackerDomainError::EmptyDocumentContent);
    }
    Ok(content)
}

impl Document {
    /// Reconstructs a document from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedDocumentData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            kind: data.kind,
            content: data.content,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the document identifier.
    #[must_use]
    pub const fn id(&self) -> DocumentId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the document kind.
    #[must_use]
    pub const fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Returns the content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
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

    /// Replaces the content.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyDocumentContent`] for blank content.
    pub fn replace_content(
        &mut self,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TrackerDomainError> {
        self.content = checked_content(content.into())?;
        self.updated_at = clock.utc();
        Ok(())
    }
}

/// A document that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    project_id: ProjectId,
    kind: DocumentKind,
    content: String,
    created_at: DateTime<Utc>,
}

impl NewDocument {
    /// Prepares a document for insertion.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyDocumentContent`] for blank content.
    pub fn new(
        project_id: ProjectId,
        kind: DocumentKind,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TrackerDomainError> {
        Ok(Self {
            project_id,
            kind,
            content: checked_content(content.into())?,
            created_at: clock.utc(),
        })
    }

    /// Materialises the document under the identity chosen by the store.
    #[must_use]
    pub fn into_document(self, id: DocumentId) -> Document {
        Document::from_persisted(PersistedDocumentData {
            id,
            project_id: self.project_id,
            kind: self.kind,
            content: self.content,
            created_at: self.created_at,
            updated_at: self.created_at,
        })
    }
}

/// Optional constraints when listing the documents of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    /// Only documents of this kind.
    pub kind: Option<DocumentKind>,
    /// Only documents whose content contains this text.
    pub search: Option<String>,
}

impl DocumentFilter {
    /// Returns whether `document` satisfies every constraint of the filter.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        self.kind.is_none_or(|kind| document.kind == kind)
            && self
                .search
                .as_deref()
                .is_none_or(|needle| document.content.contains(needle))
    }
}
