//! Thread-safe in-memory implementation of the tracker store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::tracker::{
    domain::{
        Comment, CommentId, CommentTarget, Document, DocumentFilter, DocumentId, Epic,
        EpicFilter, EpicId, NewComment, NewDocument, NewEpic, NewProject, NewSprint, NewStory,
        Project, ProjectId, ProjectName, Sprint, SprintId, SprintMembership, SprintStatus, Story,
        StoryFilter, StoryId, WorkflowStatus,
    },
    ports::{TrackerStore, TrackerStoreError, TrackerStoreResult, TrackerTransaction},
};

/// In-memory tracker store.
///
/// Units of work are serialised by a single mutex and write straight into the
/// shared state. Every write records what it displaced in a journal; when a
/// unit of work fails the journal is replayed backwards, so a failed
/// operation leaves no trace and read-only work copies nothing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackerStore {
    state: Arc<Mutex<TrackerState>>,
}

#[derive(Debug, Clone, Default)]
struct TrackerState {
    projects: HashMap<ProjectId, Project>,
    epics: HashMap<EpicId, Epic>,
    stories: HashMap<StoryId, Story>,
    sprints: HashMap<SprintId, Sprint>,
    memberships: HashMap<(StoryId, SprintId), SprintMembership>,
    comments: HashMap<CommentId, Comment>,
    documents: HashMap<DocumentId, Document>,
}

impl InMemoryTrackerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TrackerStore for InMemoryTrackerStore {
    async fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TrackerTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TrackerStoreError> + Send + 'static,
    {
        let mut live = self.state.lock().map_err(|err| {
            E::from(TrackerStoreError::persistence(std::io::Error::other(
                err.to_string(),
            )))
        })?;
        let mut tx = MemoryTransaction {
            state: &mut *live,
            journal: Vec::new(),
        };
        let outcome = work(&mut tx);
        if outcome.is_err() {
            tx.roll_back();
        }
        outcome
    }
}

/// A record as it was before a write; `None` means the write inserted it.
enum Undo {
    Project(ProjectId),
    Epic(EpicId, Option<Epic>),
    Story(StoryId, Option<Story>),
    Sprint(SprintId, Option<Sprint>),
    Membership((StoryId, SprintId), Option<SprintMembership>),
    Comment(CommentId),
    Document(DocumentId, Option<Document>),
}

struct MemoryTransaction<'state> {
    state: &'state mut TrackerState,
    journal: Vec<Undo>,
}

fn restore<K, V>(map: &mut HashMap<K, V>, key: K, previous: Option<V>)
where
    K: std::hash::Hash + Eq,
{
    match previous {
        Some(value) => {
            map.insert(key, value);
        }
        None => {
            map.remove(&key);
        }
    }
}

/// Collects values ordered by creation time, then identifier.
fn ordered<'a, T, K>(
    values: impl Iterator<Item = &'a T>,
    key: impl Fn(&T) -> (DateTime<Utc>, K),
) -> Vec<T>
where
    T: Clone + 'a,
    K: Ord,
{
    let mut collected: Vec<T> = values.cloned().collect();
    collected.sort_by(|left, right| key(left).cmp(&key(right)));
    collected
}

/// Overwrites an existing record and returns the value it displaced.
fn replace<K, V>(
    map: &mut HashMap<K, V>,
    key: K,
    value: &V,
    entity: &'static str,
    id: impl AsRef<Uuid>,
) -> TrackerStoreResult<V>
where
    K: std::hash::Hash + Eq,
    V: Clone,
{
    let slot = map
        .get_mut(&key)
        .ok_or_else(|| TrackerStoreError::missing(entity, id))?;
    Ok(std::mem::replace(slot, value.clone()))
}

impl MemoryTransaction<'_> {
    /// Reverts every journalled write, newest first.
    fn roll_back(&mut self) {
        while let Some(change) = self.journal.pop() {
            match change {
                Undo::Project(id) => {
                    self.state.projects.remove(&id);
                }
                Undo::Epic(id, previous) => restore(&mut self.state.epics, id, previous),
                Undo::Story(id, previous) => restore(&mut self.state.stories, id, previous),
                Undo::Sprint(id, previous) => restore(&mut self.state.sprints, id, previous),
                Undo::Membership(key, previous) => {
                    restore(&mut self.state.memberships, key, previous);
                }
                Undo::Comment(id) => {
                    self.state.comments.remove(&id);
                }
                Undo::Document(id, previous) => {
                    restore(&mut self.state.documents, id, previous);
                }
            }
        }
    }

    fn project_of_epic(&self, epic: EpicId) -> Option<ProjectId> {
        self.state.epics.get(&epic).map(Epic::project_id)
    }

    fn member_stories(&self, sprint: SprintId) -> impl Iterator<Item = &Story> {
        self.state
            .memberships
            .keys()
            .filter(move |(_, member_of)| *member_of == sprint)
            .filter_map(|(story, _)| self.state.stories.get(story))
    }
}

impl TrackerTransaction for MemoryTransaction<'_> {
    fn find_project(&mut self, id: ProjectId) -> TrackerStoreResult<Option<Project>> {
        Ok(self.state.projects.get(&id).cloned())
    }

    fn find_project_by_name(&mut self, name: &ProjectName) -> TrackerStoreResult<Option<Project>> {
        Ok(self
            .state
            .projects
            .values()
            .find(|project| project.name() == name)
            .cloned())
    }

    fn insert_project(&mut self, project: NewProject) -> TrackerStoreResult<Project> {
        if self.find_project_by_name(project.name())?.is_some() {
            return Err(TrackerStoreError::DuplicateProjectName(
                project.name().clone(),
            ));
        }
        let stored = project.into_project(ProjectId::from_uuid(Uuid::new_v4()));
        self.state.projects.insert(stored.id(), stored.clone());
        self.journal.push(Undo::Project(stored.id()));
        Ok(stored)
    }

    fn list_projects(&mut self) -> TrackerStoreResult<Vec<Project>> {
        Ok(ordered(self.state.projects.values(), |project| {
            (project.created_at(), project.id())
        }))
    }

    fn find_epic(&mut self, id: EpicId) -> TrackerStoreResult<Option<Epic>> {
        Ok(self.state.epics.get(&id).cloned())
    }

    fn insert_epic(&mut self, epic: NewEpic) -> TrackerStoreResult<Epic> {
        let stored = epic.into_epic(EpicId::from_uuid(Uuid::new_v4()));
        self.state.epics.insert(stored.id(), stored.clone());
        self.journal.push(Undo::Epic(stored.id(), None));
        Ok(stored)
    }

    fn update_epic(&mut self, epic: &Epic) -> TrackerStoreResult<()> {
        let previous = replace(&mut self.state.epics, epic.id(), epic, "epic", epic.id())?;
        self.journal.push(Undo::Epic(epic.id(), Some(previous)));
        Ok(())
    }

    fn list_epics(
        &mut self,
        project: ProjectId,
        filter: &EpicFilter,
    ) -> TrackerStoreResult<Vec<Epic>> {
        let matching = self
            .state
            .epics
            .values()
            .filter(|epic| epic.project_id() == project && filter.matches(epic));
        Ok(ordered(matching, |epic| (epic.created_at(), epic.id())))
    }

    fn find_story(&mut self, id: StoryId) -> TrackerStoreResult<Option<Story>> {
        Ok(self.state.stories.get(&id).cloned())
    }

    fn insert_story(&mut self, story: NewStory) -> TrackerStoreResult<Story> {
        let stored = story.into_story(StoryId::from_uuid(Uuid::new_v4()));
        self.state.stories.insert(stored.id(), stored.clone());
        self.journal.push(Undo::Story(stored.id(), None));
        Ok(stored)
    }

    fn update_story(&mut self, story: &Story) -> TrackerStoreResult<()> {
        let previous = replace(&mut self.state.stories, story.id(), story, "story", story.id())?;
        self.journal.push(Undo::Story(story.id(), Some(previous)));
        Ok(())
    }

    fn list_stories(
        &mut self,
        project: ProjectId,
        filter: &StoryFilter,
    ) -> TrackerStoreResult<Vec<Story>> {
        let matching = self.state.stories.values().filter(|story| {
            self.project_of_epic(story.epic_id()) == Some(project)
                && filter.matches(story)
                && filter.sprint.is_none_or(|sprint| {
                    self.state.memberships.contains_key(&(story.id(), sprint))
                })
        });
        Ok(ordered(matching, |story| (story.created_at(), story.id())))
    }

    fn find_sprint(&mut self, id: SprintId) -> TrackerStoreResult<Option<Sprint>> {
        Ok(self.state.sprints.get(&id).cloned())
    }

    fn insert_sprint(&mut self, sprint: NewSprint) -> TrackerStoreResult<Sprint> {
        let stored = sprint.into_sprint(SprintId::from_uuid(Uuid::new_v4()));
        self.state.sprints.insert(stored.id(), stored.clone());
        self.journal.push(Undo::Sprint(stored.id(), None));
        Ok(stored)
    }

    fn update_sprint(&mut self, sprint: &Sprint) -> TrackerStoreResult<()> {
        let previous =
            replace(&mut self.state.sprints, sprint.id(), sprint, "sprint", sprint.id())?;
        self.journal.push(Undo::Sprint(sprint.id(), Some(previous)));
        Ok(())
    }

    fn list_sprints(&mut self, project: ProjectId) -> TrackerStoreResult<Vec<Sprint>> {
        let matching = self
            .state
            .sprints
            .values()
            .filter(|sprint| sprint.project_id() == project);
        Ok(ordered(matching, |sprint| (sprint.created_at(), sprint.id())))
    }

    fn find_membership(
        &mut self,
        story: StoryId,
        sprint: SprintId,
    ) -> TrackerStoreResult<Option<SprintMembership>> {
        Ok(self.state.memberships.get(&(story, sprint)).copied())
    }

    fn insert_membership(&mut self, membership: &SprintMembership) -> TrackerStoreResult<()> {
        let key = (membership.story_id(), membership.sprint_id());
        if self.state.memberships.contains_key(&key) {
            return Err(TrackerStoreError::DuplicateMembership {
                story: key.0,
                sprint: key.1,
            });
        }
        self.state.memberships.insert(key, *membership);
        self.journal.push(Undo::Membership(key, None));
        Ok(())
    }

    fn delete_membership(&mut self, story: StoryId, sprint: SprintId) -> TrackerStoreResult<bool> {
        let key = (story, sprint);
        let Some(removed) = self.state.memberships.remove(&key) else {
            return Ok(false);
        };
        self.journal.push(Undo::Membership(key, Some(removed)));
        Ok(true)
    }

    fn active_sprints_containing(&mut self, story: StoryId) -> TrackerStoreResult<Vec<Sprint>> {
        let active = self
            .state
            .memberships
            .keys()
            .filter(|(member, _)| *member == story)
            .filter_map(|(_, sprint)| self.state.sprints.get(sprint))
            .filter(|sprint| sprint.status() == SprintStatus::Active);
        Ok(ordered(active, |sprint| (sprint.created_at(), sprint.id())))
    }

    fn sprint_stories(&mut self, sprint: SprintId) -> TrackerStoreResult<Vec<Story>> {
        Ok(ordered(self.member_stories(sprint), |story| {
            (story.created_at(), story.id())
        }))
    }

    fn sprint_stories_with_status(
        &mut self,
        sprint: SprintId,
        statuses: &[WorkflowStatus],
    ) -> TrackerStoreResult<Vec<Story>> {
        let matching = self
            .member_stories(sprint)
            .filter(|story| statuses.contains(&story.status()));
        Ok(ordered(matching, |story| (story.created_at(), story.id())))
    }

    fn insert_comment(&mut self, comment: NewComment) -> TrackerStoreResult<Comment> {
        let stored = comment.into_comment(CommentId::from_uuid(Uuid::new_v4()));
        self.state.comments.insert(stored.id(), stored.clone());
        self.journal.push(Undo::Comment(stored.id()));
        Ok(stored)
    }

    fn list_comments(&mut self, target: CommentTarget) -> TrackerStoreResult<Vec<Comment>> {
        let matching = self
            .state
            .comments
            .values()
            .filter(|comment| comment.target() == target);
        Ok(ordered(matching, |comment| (comment.created_at(), comment.id())))
    }

    fn find_document(&mut self, id: DocumentId) -> TrackerStoreResult<Option<Document>> {
        Ok(self.state.documents.get(&id).cloned())
    }

    fn insert_document(&mut self, document: NewDocument) -> TrackerStoreResult<Document> {
        let stored = document.into_document(DocumentId::from_uuid(Uuid::new_v4()));
        self.state.documents.insert(stored.id(), stored.clone());
        self.journal.push(Undo::Document(stored.id(), None));
        Ok(stored)
    }

    fn update_document(&mut self, document: &Document) -> TrackerStoreResult<()> {
        let previous = replace(
            &mut self.state.documents,
            document.id(),
            document,
            "document",
            document.id(),
        )?;
        self.journal.push(Undo::Document(document.id(), Some(previous)));
        Ok(())
    }

    fn list_documents(
        &mut self,
        project: ProjectId,
        filter: &DocumentFilter,
    ) -> TrackerStoreResult<Vec<Document>> {
        let matching = self
            .state
            .documents
            .values()
            .filter(|document| document.project_id() == project && filter.matches(document));
        Ok(ordered(matching, |document| {
            (document.created_at(), document.id())
        }))
    }
}
