//! Comments attached to a story or an epic.

use super::{CommentId, EpicId, StoryId, TrackerDomainError, text::{bounded, bounded_trimmed}};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// The single entity a comment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum CommentTarget {
    /// Comment on a story.
    Story(StoryId),
    /// Comment on an epic.
    Epic(EpicId),
}

/// Comment body of 10 to 1000 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentText(String);

impl CommentText {
    /// Creates a validated comment body.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::TextLength`] when the value is outside
    /// 10..=1000 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        bounded("comment text", value.into(), 10, 1000).map(Self)
    }

    /// Returns the body as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CommentText {
    type Error = TrackerDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CommentText> for String {
    fn from(value: CommentText) -> Self {
        value.0
    }
}

/// Free-form author name, at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentAuthor(String);

impl CommentAuthor {
    /// Creates a validated author name.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::TextLength`] when the trimmed value is
    /// empty or longer than 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        bounded_trimmed("author", value, 1, 100).map(Self)
    }

    /// Returns the author as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CommentAuthor {
    type Error = TrackerDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CommentAuthor> for String {
    fn from(value: CommentAuthor) -> Self {
        value.0
    }
}

/// A comment on a story or epic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    target: CommentTarget,
    text: CommentText,
    author: Option<CommentAuthor>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Persisted comment identifier.
    pub id: CommentId,
    /// Persisted target.
    pub target: CommentTarget,
    /// Persisted body.
    pub text: CommentText,
    /// Persisted author, if any.
    pub author: Option<CommentAuthor>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            target: data.target,
            text: data.text,
            author: data.author,
            created_at: data.created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns what the comment is attached to.
    #[must_use]
    pub const fn target(&self) -> CommentTarget {
        self.target
    }

    /// Returns the body.
    #[must_use]
    pub const fn text(&self) -> &CommentText {
        &self.text
    }

    /// Returns the author, if any.
    #[must_use]
    pub const fn author(&self) -> Option<&CommentAuthor> {
        self.author.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A comment that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    target: CommentTarget,
    text: CommentText,
    author: Option<CommentAuthor>,
    created_at: DateTime<Utc>,
}

impl NewComment {
    /// Prepares a comment for insertion.
    #[must_use]
    pub fn new(
        target: CommentTarget,
        text: CommentText,
        author: Option<CommentAuthor>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            target,
            text,
            author,
            created_at: clock.utc(),
        }
    }

    /// Materialises the comment under the identity chosen by the store.
    #[must_use]
    pub fn into_comment(self, id: CommentId) -> Comment {
        Comment::from_persisted(PersistedCommentData {
            id,
            target: self.target,
            text: self.text,
            author: self.author,
            created_at: self.created_at,
        })
    }
}
