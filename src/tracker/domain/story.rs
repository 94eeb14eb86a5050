//! Story aggregate and its estimation, priority and assignment values.

use super::{
    EpicId, InvalidTransition, ParsePriorityError, SprintId, StoryId, Title, TrackerDomainError,
    WorkflowStatus,
    text::{bounded, bounded_trimmed},
    validate_transition,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Story estimate on the Fibonacci-like scale {0, 1, 2, 3, 5, 8, 13}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StoryPoints(u8);

impl StoryPoints {
    /// Every accepted estimate, in ascending order.
    pub const SCALE: [u8; 7] = [0, 1, 2, 3, 5, 8, 13];

    /// Creates a validated estimate.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::InvalidStoryPoints`] when `value` is not
    /// on the scale.
    pub fn new(value: u8) -> Result<Self, TrackerDomainError> {
        if Self::SCALE.contains(&value) {
            Ok(Self(value))
        } else {
            Err(TrackerDomainError::InvalidStoryPoints(value))
        }
    }

    /// Returns the numeric estimate.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for StoryPoints {
    type Error = TrackerDomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StoryPoints> for u8 {
    fn from(value: StoryPoints) -> Self {
        value.0
    }
}

impl fmt::Display for StoryPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Story priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default priority.
    #[default]
    Medium,
    /// Should be picked up soon.
    High,
    /// Blocks other work.
    Critical,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Story description of 10 to 5000 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StoryDescription(String);

impl StoryDescription {
    /// Creates a validated description. Surrounding whitespace is kept.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::TextLength`] when the value is outside
    /// 10..=5000 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        bounded("description", value.into(), 10, 5000).map(Self)
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StoryDescription {
    type Error = TrackerDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StoryDescription> for String {
    fn from(value: StoryDescription) -> Self {
        value.0
    }
}

/// Name of the person a story is assigned to, at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Assignee(String);

impl Assignee {
    /// Creates a validated assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::TextLength`] when the trimmed value is
    /// empty or longer than 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        bounded_trimmed("assignee", value, 1, 100).map(Self)
    }

    /// Returns the assignee as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Assignee {
    type Error = TrackerDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Assignee> for String {
    fn from(value: Assignee) -> Self {
        value.0
    }
}

impl fmt::Display for Assignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Story aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    id: StoryId,
    epic_id: EpicId,
    title: Title,
    description: StoryDescription,
    points: StoryPoints,
    priority: Priority,
    status: WorkflowStatus,
    assignee: Option<Assignee>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedStoryData {
    /// Persisted story identifier.
    pub id: StoryId,
    /// Owning epic.
    pub epic_id: EpicId,
    /// Persisted title.
    pub title: Title,
    /// Persisted description.
    pub description: StoryDescription,
    /// Persisted estimate.
    pub points: StoryPoints,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted workflow status.
    pub status: WorkflowStatus,
    /// Persisted assignee, if any.
    pub assignee: Option<Assignee>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial story update.
///
/// `None` means "leave unchanged". For [`StoryPatch::assignee`] the inner
/// option distinguishes assigning (`Some(Some(_))`) from clearing
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryPatch {
    /// Replacement title.
    pub title: Option<Title>,
    /// Replacement description.
    pub description: Option<StoryDescription>,
    /// Replacement estimate.
    pub points: Option<StoryPoints>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Requested workflow status.
    pub status: Option<WorkflowStatus>,
    /// Replacement or cleared assignee.
    pub assignee: Option<Option<Assignee>>,
}

impl StoryPatch {
    /// Returns a patch that only requests a status change.
    #[must_use]
    pub fn status(status: WorkflowStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Story {
    /// Reconstructs a story from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedStoryData) -> Self {
        Self {
            id: data.id,
            epic_id: data.epic_id,
            title: data.title,
            description: data.description,
            points: data.points,
            priority: data.priority,
            status: data.status,
            assignee: data.assignee,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the story identifier.
    #[must_use]
    pub const fn id(&self) -> StoryId {
        self.id
    }

    /// Returns the owning epic.
    #[must_use]
    pub const fn epic_id(&self) -> EpicId {
        self.epic_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &StoryDescription {
        &self.description
    }

    /// Returns the estimate.
    #[must_use]
    pub const fn points(&self) -> StoryPoints {
        self.points
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> WorkflowStatus {
        self.status
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&Assignee> {
        self.assignee.as_ref()
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

    /// Applies `patch` as a whole or not at all.
    ///
    /// A requested status is checked against the workflow before any field is
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] when the requested status skips a stage;
    /// the story is left unchanged.
    pub fn apply(
        &mut self,
        patch: StoryPatch,
        clock: &impl Clock,
    ) -> Result<(), InvalidTransition> {
        if let Some(status) = patch.status {
            validate_transition(self.status, status)?;
            self.status = status;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(points) = patch.points {
            self.points = points;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(assignee) = patch.assignee {
            self.assignee = assignee;
        }
        self.updated_at = clock.utc();
        Ok(())
    }
}

/// A story that has not been stored yet.
///
/// New stories always start in [`WorkflowStatus::Backlog`] with nobody
/// assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStory {
    epic_id: EpicId,
    title: Title,
    description: StoryDescription,
    points: StoryPoints,
    priority: Priority,
    created_at: DateTime<Utc>,
}

impl NewStory {
    /// Prepares a story for insertion.
    #[must_use]
    pub fn new(
        epic_id: EpicId,
        title: Title,
        description: StoryDescription,
        points: StoryPoints,
        priority: Priority,
        clock: &impl Clock,
    ) -> Self {
        Self {
            epic_id,
            title,
            description,
            points,
            priority,
            created_at: clock.utc(),
        }
    }

    /// Returns the owning epic.
    #[must_use]
    pub const fn epic_id(&self) -> EpicId {
        self.epic_id
    }

    /// Materialises the story under the identity chosen by the store.
    #[must_use]
    pub fn into_story(self, id: StoryId) -> Story {
        Story::from_persisted(PersistedStoryData {
            id,
            epic_id: self.epic_id,
            title: self.title,
            description: self.description,
            points: self.points,
            priority: self.priority,
            status: WorkflowStatus::Backlog,
            assignee: None,
            created_at: self.created_at,
            updated_at: self.created_at,
        })
    }
}

/// Optional constraints when listing the stories of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryFilter {
    /// Only stories with this status.
    pub status: Option<WorkflowStatus>,
    /// Only stories with this priority.
    pub priority: Option<Priority>,
    /// Only stories assigned to this person.
    pub assignee: Option<String>,
    /// Only stories with a membership record in this sprint.
    pub sprint: Option<SprintId>,
    /// Only stories whose title or description contains this text.
    pub search: Option<String>,
}

impl StoryFilter {
    /// Returns whether `story` satisfies the record-level constraints.
    ///
    /// [`StoryFilter::sprint`] depends on membership records and is left to
    /// the store.
    #[must_use]
    pub fn matches(&self, story: &Story) -> bool {
        self.status.is_none_or(|status| story.status == status)
            && self.priority.is_none_or(|priority| story.priority == priority)
            && self.assignee.as_deref().is_none_or(|assignee| {
                story.assignee.as_ref().is_some_and(|current| current.as_str() == assignee)
            })
            && self.search.as_deref().is_none_or(|needle| {
                story.title.as_str().contains(needle) || story.description.as_str().contains(needle)
            })
    }
}
