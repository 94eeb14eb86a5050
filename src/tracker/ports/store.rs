//! Transactional entity store contract.
//!
//! Every business operation runs as one unit of work: the service hands a
//! closure to [`TrackerStore::transaction`], the closure reads, validates and
//! writes through a [`TrackerTransaction`], and the store commits only when
//! the closure returns `Ok`. Stores are responsible for isolating concurrent
//! units of work that touch the same stories, sprints or membership records,
//! and for minting entity identities on insert.

use crate::tracker::domain::{
    Comment, CommentTarget, Document, DocumentFilter, DocumentId, Epic, EpicFilter, EpicId,
    NewComment, NewDocument, NewEpic, NewProject, NewSprint, NewStory, Project, ProjectId,
    ProjectName, Sprint, SprintId, SprintMembership, Story, StoryFilter, StoryId, WorkflowStatus,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Result type for entity store operations.
pub type TrackerStoreResult<T> = Result<T, TrackerStoreError>;

/// Entity store with all-or-nothing units of work.
#[async_trait]
pub trait TrackerStore: Send + Sync {
    /// Runs `work` inside a single isolated transaction.
    ///
    /// Changes made through the transaction become visible to other callers
    /// only if `work` returns `Ok`; an `Err` discards all of them.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or a [`TrackerStoreError`]
    /// converted into `E` when the transaction cannot be opened or committed.
    async fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TrackerTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TrackerStoreError> + Send + 'static;
}

/// Reads and writes available inside a store transaction.
///
/// List operations return records ordered by creation time.
#[cfg_attr(test, mockall::automock)]
pub trait TrackerTransaction {
    /// Finds a project by identifier.
    fn find_project(&mut self, id: ProjectId) -> TrackerStoreResult<Option<Project>>;

    /// Finds a project by its unique name.
    fn find_project_by_name(&mut self, name: &ProjectName) -> TrackerStoreResult<Option<Project>>;

    /// Stores a new project under a fresh identity.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerStoreError::DuplicateProjectName`] when the name is
    /// taken.
    fn insert_project(&mut self, project: NewProject) -> TrackerStoreResult<Project>;

    /// Returns every project.
    fn list_projects(&mut self) -> TrackerStoreResult<Vec<Project>>;

    /// Finds an epic by identifier.
    fn find_epic(&mut self, id: EpicId) -> TrackerStoreResult<Option<Epic>>;

    /// Stores a new epic under a fresh identity.
    fn insert_epic(&mut self, epic: NewEpic) -> TrackerStoreResult<Epic>;

    /// Persists changes to an existing epic.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerStoreError::MissingRecord`] when the epic does not
    /// exist.
    fn update_epic(&mut self, epic: &Epic) -> TrackerStoreResult<()>;

    /// Returns the epics of a project that match `filter`.
    fn list_epics(&mut self, project: ProjectId, filter: &EpicFilter)
    -> TrackerStoreResult<Vec<Epic>>;

    /// Finds a story by identifier.
    fn find_story(&mut self, id: StoryId) -> TrackerStoreResult<Option<Story>>;

    /// Stores a new story under a fresh identity.
    fn insert_story(&mut self, story: NewStory) -> TrackerStoreResult<Story>;

    /// Persists changes to an existing story.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerStoreError::MissingRecord`] when the story does not
    /// exist.
    fn update_story(&mut self, story: &Story) -> TrackerStoreResult<()>;

    /// Returns the stories of a project (through their epics) that match
    /// `filter`, including its sprint constraint.
    fn list_stories(
        &mut self,
        project: ProjectId,
        filter: &StoryFilter,
    ) -> TrackerStoreResult<Vec<Story>>;

    /// Finds a sprint by identifier.
    fn find_sprint(&mut self, id: SprintId) -> TrackerStoreResult<Option<Sprint>>;

    /// Stores a new sprint under a fresh identity.
    fn insert_sprint(&mut self, sprint: NewSprint) -> TrackerStoreResult<Sprint>;

    /// Persists changes to an existing sprint.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerStoreError::MissingRecord`] when the sprint does not
    /// exist.
    fn update_sprint(&mut self, sprint: &Sprint) -> TrackerStoreResult<()>;

    /// Returns the sprints of a project.
    fn list_sprints(&mut self, project: ProjectId) -> TrackerStoreResult<Vec<Sprint>>;

    /// Finds the membership record for the (story, sprint) pair.
    fn find_membership(
        &mut self,
        story: StoryId,
        sprint: SprintId,
    ) -> TrackerStoreResult<Option<SprintMembership>>;

    /// Stores a membership record.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerStoreError::DuplicateMembership`] when the pair is
    /// already recorded.
    fn insert_membership(&mut self, membership: &SprintMembership) -> TrackerStoreResult<()>;

    /// Deletes the membership record for the pair, returning whether one
    /// existed.
    fn delete_membership(&mut self, story: StoryId, sprint: SprintId) -> TrackerStoreResult<bool>;

    /// Returns the `active` sprints holding a membership record for `story`.
    fn active_sprints_containing(&mut self, story: StoryId) -> TrackerStoreResult<Vec<Sprint>>;

    /// Returns every story with a membership record in `sprint`.
    fn sprint_stories(&mut self, sprint: SprintId) -> TrackerStoreResult<Vec<Story>>;

    /// Returns the member stories of `sprint` whose status is in `statuses`.
    fn sprint_stories_with_status(
        &mut self,
        sprint: SprintId,
        statuses: &[WorkflowStatus],
    ) -> TrackerStoreResult<Vec<Story>>;

    /// Stores a new comment under a fresh identity.
    fn insert_comment(&mut self, comment: NewComment) -> TrackerStoreResult<Comment>;

    /// Returns the comments attached to `target`.
    fn list_comments(&mut self, target: CommentTarget) -> TrackerStoreResult<Vec<Comment>>;

    /// Finds a document by identifier.
    fn find_document(&mut self, id: DocumentId) -> TrackerStoreResult<Option<Document>>;

    /// Stores a new document under a fresh identity.
    fn insert_document(&mut self, document: NewDocument) -> TrackerStoreResult<Document>;

    /// Persists changes to an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerStoreError::MissingRecord`] when the document does not
    /// exist.
    fn update_document(&mut self, document: &Document) -> TrackerStoreResult<()>;

    /// Returns the documents of a project that match `filter`.
    fn list_documents(
        &mut self,
        project: ProjectId,
        filter: &DocumentFilter,
    ) -> TrackerStoreResult<Vec<Document>>;
}

/// Errors returned by entity store implementations.
#[derive(Debug, Clone, Error)]
pub enum TrackerStoreError {
    /// Another project already uses the name.
    #[error("duplicate project name: {0}")]
    DuplicateProjectName(ProjectName),

    /// The (story, sprint) pair is already recorded.
    #[error("story {story} is already recorded in sprint {sprint}")]
    DuplicateMembership {
        /// Member story.
        story: StoryId,
        /// Containing sprint.
        sprint: SprintId,
    },

    /// An update targeted a record that does not exist.
    #[error("{entity} {id} does not exist")]
    MissingRecord {
        /// Kind of record.
        entity: &'static str,
        /// Identifier that was looked up.
        id: Uuid,
    },

    /// A concurrent transaction touched the same records; retrying may
    /// succeed.
    #[error("transaction aborted by a concurrent update")]
    Contention,

    /// Stored data could not be turned back into domain values.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TrackerStoreError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Builds a [`TrackerStoreError::MissingRecord`] for `id`.
    pub fn missing(entity: &'static str, id: impl AsRef<Uuid>) -> Self {
        Self::MissingRecord {
            entity,
            id: *id.as_ref(),
        }
    }
}
