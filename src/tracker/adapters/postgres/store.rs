//! `PostgreSQL` implementation of the tracker store.
//!
//! Units of work run in `SERIALIZABLE` transactions on a pooled connection
//! inside `spawn_blocking`. Serialization failures surface as
//! [`TrackerStoreError::Contention`].

use super::{
    models::{
        CommentRow, DocumentRow, EpicRow, MembershipRow, ProjectRow, SprintRow, StoryRow,
    },
    schema::{comments, documents, epics, projects, sprint_memberships, sprints, stories},
};
use crate::tracker::{
    domain::{
        Assignee, Comment, CommentAuthor, CommentId, CommentTarget, CommentText, Document,
        DocumentFilter, DocumentId, DocumentKind, Epic, EpicFilter, EpicId, NewComment,
        NewDocument, NewEpic, NewProject, NewSprint, NewStory, PersistedCommentData,
        PersistedDocumentData, PersistedEpicData, PersistedProjectData, PersistedSprintData,
        PersistedStoryData, Priority, Project, ProjectId, ProjectName, Sprint, SprintId,
        SprintMembership, SprintName, SprintStatus, Story, StoryDescription, StoryFilter,
        StoryId, StoryPoints, Title, WorkflowStatus,
    },
    ports::{TrackerStore, TrackerStoreError, TrackerStoreResult, TrackerTransaction},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by the tracker store.
pub type TrackerPgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent DDL for every tracker table.
pub const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_tracker_tables/up.sql");

const PROJECT_NAME_UNIQUE: &str = "idx_projects_name_unique";
const MEMBERSHIP_PKEY: &str = "sprint_memberships_pkey";

/// `PostgreSQL`-backed tracker store.
#[derive(Debug, Clone)]
pub struct PostgresTrackerStore {
    pool: TrackerPgPool,
}

impl PostgresTrackerStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TrackerPgPool) -> Self {
        Self { pool }
    }

    /// Creates any missing tracker tables and indexes.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerStoreError::Persistence`] when the DDL cannot be
    /// applied.
    pub async fn ensure_schema(&self) -> TrackerStoreResult<()> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TrackerStoreError::persistence)?;
            connection.batch_execute(SCHEMA_SQL).map_err(store_error)
        })
        .await
        .map_err(TrackerStoreError::persistence)?
    }
}

/// Failure of a unit of work or of the surrounding database transaction.
enum TxFailure<E> {
    Work(E),
    Database(DieselError),
}

impl<E> From<DieselError> for TxFailure<E> {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

#[async_trait]
impl TrackerStore for PostgresTrackerStore {
    async fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TrackerTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TrackerStoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| E::from(TrackerStoreError::persistence(err)))?;
            connection
                .build_transaction()
                .serializable()
                .run::<T, TxFailure<E>, _>(|conn| {
                    work(&mut PgTransaction { connection: conn }).map_err(TxFailure::Work)
                })
                .map_err(|failure| match failure {
                    TxFailure::Work(err) => err,
                    TxFailure::Database(err) => E::from(store_error(err)),
                })
        })
        .await
        .map_err(|err| E::from(TrackerStoreError::persistence(err)))?
    }
}

fn store_error(err: DieselError) -> TrackerStoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
            TrackerStoreError::Contention
        }
        other => TrackerStoreError::persistence(other),
    }
}

fn violates(err: &DieselError, constraint: &str) -> bool {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            constraint_is(info.as_ref(), constraint)
        }
        _ => false,
    }
}

fn constraint_is(info: &dyn DatabaseErrorInformation, constraint: &str) -> bool {
    info.constraint_name().is_some_and(|name| name == constraint)
}

/// Wraps `text` for a `LIKE` substring match, escaping wildcards.
fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

struct PgTransaction<'conn> {
    connection: &'conn mut PgConnection,
}

impl TrackerTransaction for PgTransaction<'_> {
    fn find_project(&mut self, id: ProjectId) -> TrackerStoreResult<Option<Project>> {
        let row = projects::table
            .find(id.into_inner())
            .select(ProjectRow::as_select())
            .first::<ProjectRow>(self.connection)
            .optional()
            .map_err(store_error)?;
        row.map(row_to_project).transpose()
    }

    fn find_project_by_name(&mut self, name: &ProjectName) -> TrackerStoreResult<Option<Project>> {
        let row = projects::table
            .filter(projects::name.eq(name.as_str()))
            .select(ProjectRow::as_select())
            .first::<ProjectRow>(self.connection)
            .optional()
            .map_err(store_error)?;
        row.map(row_to_project).transpose()
    }

    fn insert_project(&mut self, draft: NewProject) -> TrackerStoreResult<Project> {
        let project = draft.into_project(ProjectId::from_uuid(Uuid::new_v4()));
        let row = ProjectRow {
            id: project.id().into_inner(),
            name: project.name().as_str().to_owned(),
            created_at: project.created_at(),
        };
        diesel::insert_into(projects::table)
            .values(&row)
            .execute(self.connection)
            .map_err(|err| {
                if violates(&err, PROJECT_NAME_UNIQUE) {
                    TrackerStoreError::DuplicateProjectName(project.name().clone())
                } else {
                    store_error(err)
                }
            })?;
        Ok(project)
    }

    fn list_projects(&mut self) -> TrackerStoreResult<Vec<Project>> {
        projects::table
            .select(ProjectRow::as_select())
            .order((projects::created_at.asc(), projects::id.asc()))
            .load::<ProjectRow>(self.connection)
            .map_err(store_error)?
            .into_iter()
            .map(row_to_project)
            .collect()
    }

    fn find_epic(&mut self, id: EpicId) -> TrackerStoreResult<Option<Epic>> {
        let row = epics::table
            .find(id.into_inner())
            .select(EpicRow::as_select())
            .first::<EpicRow>(self.connection)
            .optional()
            .map_err(store_error)?;
        row.map(row_to_epic).transpose()
    }

    fn insert_epic(&mut self, draft: NewEpic) -> TrackerStoreResult<Epic> {
        let epic = draft.into_epic(EpicId::from_uuid(Uuid::new_v4()));
        diesel::insert_into(epics::table)
            .values(&epic_row(&epic))
            .execute(self.connection)
            .map_err(store_error)?;
        Ok(epic)
    }

    fn update_epic(&mut self, epic: &Epic) -> TrackerStoreResult<()> {
        let changed = diesel::update(epics::table.find(epic.id().into_inner()))
            .set((
                epics::title.eq(epic.title().as_str()),
                epics::status.eq(epic.status().as_str()),
                epics::updated_at.eq(epic.updated_at()),
            ))
            .execute(self.connection)
            .map_err(store_error)?;
        if changed == 0 {
            return Err(TrackerStoreError::missing("epic", epic.id()));
        }
        Ok(())
    }

    fn list_epics(
        &mut self,
        project: ProjectId,
        filter: &EpicFilter,
    ) -> TrackerStoreResult<Vec<Epic>> {
        let mut query = epics::table
            .filter(epics::project_id.eq(project.into_inner()))
            .select(EpicRow::as_select())
            .into_boxed();
        if let Some(status) = filter.status {
            query = query.filter(epics::status.eq(status.as_str()));
        }
        if let Some(search) = filter.search.as_deref() {
            query = query.filter(epics::title.like(like_pattern(search)));
        }
        query
            .order((epics::created_at.asc(), epics::id.asc()))
            .load::<EpicRow>(self.connection)
            .map_err(store_error)?
            .into_iter()
            .map(row_to_epic)
            .collect()
    }

    fn find_story(&mut self, id: StoryId) -> TrackerStoreResult<Option<Story>> {
        let row = stories::table
            .find(id.into_inner())
            .select(StoryRow::as_select())
            .first::<StoryRow>(self.connection)
            .optional()
            .map_err(store_error)?;
        row.map(row_to_story).transpose()
    }

    fn insert_story(&mut self, draft: NewStory) -> TrackerStoreResult<Story> {
        let story = draft.into_story(StoryId::from_uuid(Uuid::new_v4()));
        diesel::insert_into(stories::table)
            .values(&story_row(&story))
            .execute(self.connection)
            .map_err(store_error)?;
        Ok(story)
    }

    fn update_story(&mut self, story: &Story) -> TrackerStoreResult<()> {
        let changed = diesel::update(stories::table.find(story.id().into_inner()))
            .set((
                stories::title.eq(story.title().as_str()),
                stories::description.eq(story.description().as_str()),
                stories::points.eq(i16::from(story.points().value())),
                stories::priority.eq(story.priority().as_str()),
                stories::status.eq(story.status().as_str()),
                stories::assignee.eq(story.assignee().map(Assignee::as_str)),
                stories::updated_at.eq(story.updated_at()),
            ))
            .execute(self.connection)
            .map_err(store_error)?;
        if changed == 0 {
            return Err(TrackerStoreError::missing("story", story.id()));
        }
        Ok(())
    }

    fn list_stories(
        &mut self,
        project: ProjectId,
        filter: &StoryFilter,
    ) -> TrackerStoreResult<Vec<Story>> {
        let mut query = stories::table
            .inner_join(epics::table)
            .filter(epics::project_id.eq(project.into_inner()))
            .select(StoryRow::as_select())
            .into_boxed();
        if let Some(status) = filter.status {
            query = query.filter(stories::status.eq(status.as_str()));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(stories::priority.eq(priority.as_str()));
        }
        if let Some(assignee) = filter.assignee.as_deref() {
            query = query.filter(stories::assignee.eq(assignee));
        }
        if let Some(sprint) = filter.sprint {
            let members = sprint_memberships::table
                .filter(sprint_memberships::sprint_id.eq(sprint.into_inner()))
                .select(sprint_memberships::story_id);
            query = query.filter(stories::id.eq_any(members));
        }
        if let Some(search) = filter.search.as_deref() {
            let pattern = like_pattern(search);
            query = query.filter(
                stories::title
                    .like(pattern.clone())
                    .or(stories::description.like(pattern)),
            );
        }
        query
            .order((stories::created_at.asc(), stories::id.asc()))
            .load::<StoryRow>(self.connection)
            .map_err(store_error)?
            .into_iter()
            .map(row_to_story)
            .collect()
    }

    fn find_sprint(&mut self, id: SprintId) -> TrackerStoreResult<Option<Sprint>> {
        let row = sprints::table
            .find(id.into_inner())
            .select(SprintRow::as_select())
            .first::<SprintRow>(self.connection)
            .optional()
            .map_err(store_error)?;
        row.map(row_to_sprint).transpose()
    }

    fn insert_sprint(&mut self, draft: NewSprint) -> TrackerStoreResult<Sprint> {
        let sprint = draft.into_sprint(SprintId::from_uuid(Uuid::new_v4()));
        diesel::insert_into(sprints::table)
            .values(&sprint_row(&sprint))
            .execute(self.connection)
            .map_err(store_error)?;
        Ok(sprint)
    }

    fn update_sprint(&mut self, sprint: &Sprint) -> TrackerStoreResult<()> {
        let changed = diesel::update(sprints::table.find(sprint.id().into_inner()))
            .set((
                sprints::name.eq(sprint.name().as_str()),
                sprints::status.eq(sprint.status().as_str()),
                sprints::updated_at.eq(sprint.updated_at()),
            ))
            .execute(self.connection)
            .map_err(store_error)?;
        if changed == 0 {
            return Err(TrackerStoreError::missing("sprint", sprint.id()));
        }
        Ok(())
    }

    fn list_sprints(&mut self, project: ProjectId) -> TrackerStoreResult<Vec<Sprint>> {
        sprints::table
            .filter(sprints::project_id.eq(project.into_inner()))
            .select(SprintRow::as_select())
            .order((sprints::created_at.asc(), sprints::id.asc()))
            .load::<SprintRow>(self.connection)
            .map_err(store_error)?
            .into_iter()
            .map(row_to_sprint)
            .collect()
    }

    fn find_membership(
        &mut self,
        story: StoryId,
        sprint: SprintId,
    ) -> TrackerStoreResult<Option<SprintMembership>> {
        let row = sprint_memberships::table
            .find((story.into_inner(), sprint.into_inner()))
            .select(MembershipRow::as_select())
            .first::<MembershipRow>(self.connection)
            .optional()
            .map_err(store_error)?;
        Ok(row.map(|row| {
            SprintMembership::from_persisted(
                StoryId::from_uuid(row.story_id),
                SprintId::from_uuid(row.sprint_id),
                row.added_at,
            )
        }))
    }

    fn insert_membership(&mut self, membership: &SprintMembership) -> TrackerStoreResult<()> {
        let row = MembershipRow {
            story_id: membership.story_id().into_inner(),
            sprint_id: membership.sprint_id().into_inner(),
            added_at: membership.added_at(),
        };
        diesel::insert_into(sprint_memberships::table)
            .values(&row)
            .execute(self.connection)
            .map_err(|err| {
                if violates(&err, MEMBERSHIP_PKEY) {
                    TrackerStoreError::DuplicateMembership {
                        story: membership.story_id(),
                        sprint: membership.sprint_id(),
                    }
                } else {
                    store_error(err)
                }
            })?;
        Ok(())
    }

    fn delete_membership(&mut self, story: StoryId, sprint: SprintId) -> TrackerStoreResult<bool> {
        let deleted = diesel::delete(
            sprint_memberships::table.find((story.into_inner(), sprint.into_inner())),
        )
        .execute(self.connection)
        .map_err(store_error)?;
        Ok(deleted > 0)
    }

    fn active_sprints_containing(&mut self, story: StoryId) -> TrackerStoreResult<Vec<Sprint>> {
        sprints::table
            .inner_join(sprint_memberships::table)
            .filter(sprint_memberships::story_id.eq(story.into_inner()))
            .filter(sprints::status.eq(SprintStatus::Active.as_str()))
            .select(SprintRow::as_select())
            .order((sprints::created_at.asc(), sprints::id.asc()))
            .load::<SprintRow>(self.connection)
            .map_err(store_error)?
            .into_iter()
            .map(row_to_sprint)
            .collect()
    }

    fn sprint_stories(&mut self, sprint: SprintId) -> TrackerStoreResult<Vec<Story>> {
        stories::table
            .inner_join(sprint_memberships::table)
            .filter(sprint_memberships::sprint_id.eq(sprint.into_inner()))
            .select(StoryRow::as_select())
            .order((stories::created_at.asc(), stories::id.asc()))
            .load::<StoryRow>(self.connection)
            .map_err(store_error)?
            .into_iter()
            .map(row_to_story)
            .collect()
    }

    fn sprint_stories_with_status(
        &mut self,
        sprint: SprintId,
        statuses: &[WorkflowStatus],
    ) -> TrackerStoreResult<Vec<Story>> {
        let names: Vec<&str> = statuses.iter().map(|status| status.as_str()).collect();
        stories::table
            .inner_join(sprint_memberships::table)
            .filter(sprint_memberships::sprint_id.eq(sprint.into_inner()))
            .filter(stories::status.eq_any(names))
            .select(StoryRow::as_select())
            .order((stories::created_at.asc(), stories::id.asc()))
            .load::<StoryRow>(self.connection)
            .map_err(store_error)?
            .into_iter()
            .map(row_to_story)
            .collect()
    }

    fn insert_comment(&mut self, draft: NewComment) -> TrackerStoreResult<Comment> {
        let comment = draft.into_comment(CommentId::from_uuid(Uuid::new_v4()));
        let (story_id, epic_id) = match comment.target() {
            CommentTarget::Story(id) => (Some(id.into_inner()), None),
            CommentTarget::Epic(id) => (None, Some(id.into_inner())),
        };
        let row = CommentRow {
            id: comment.id().into_inner(),
            story_id,
            epic_id,
            text: comment.text().as_str().to_owned(),
            author: comment.author().map(|author| author.as_str().to_owned()),
            created_at: comment.created_at(),
        };
        diesel::insert_into(comments::table)
            .values(&row)
            .execute(self.connection)
            .map_err(store_error)?;
        Ok(comment)
    }

    fn list_comments(&mut self, target: CommentTarget) -> TrackerStoreResult<Vec<Comment>> {
        let ordered = comments::table
            .select(CommentRow::as_select())
            .order((comments::created_at.asc(), comments::id.asc()))
            .into_boxed();
        let for_target = match target {
            CommentTarget::Story(id) => {
                ordered.filter(comments::story_id.eq(Some(id.into_inner())))
            }
            CommentTarget::Epic(id) => ordered.filter(comments::epic_id.eq(Some(id.into_inner()))),
        };
        for_target
            .load::<CommentRow>(self.connection)
            .map_err(store_error)?
            .into_iter()
            .map(row_to_comment)
            .collect()
    }

    fn find_document(&mut self, id: DocumentId) -> TrackerStoreResult<Option<Document>> {
        let row = documents::table
            .find(id.into_inner())
            .select(DocumentRow::as_select())
            .first::<DocumentRow>(self.connection)
            .optional()
            .map_err(store_error)?;
        row.map(row_to_document).transpose()
    }

    fn insert_document(&mut self, draft: NewDocument) -> TrackerStoreResult<Document> {
        let document = draft.into_document(DocumentId::from_uuid(Uuid::new_v4()));
        let row = DocumentRow {
            id: document.id().into_inner(),
            project_id: document.project_id().into_inner(),
            kind: document.kind().as_str().to_owned(),
            content: document.content().to_owned(),
            created_at: document.created_at(),
            updated_at: document.updated_at(),
        };
        diesel::insert_into(documents::table)
            .values(&row)
            .execute(self.connection)
            .map_err(store_error)?;
        Ok(document)
    }

    fn update_document(&mut self, document: &Document) -> TrackerStoreResult<()> {
        let changed = diesel::update(documents::table.find(document.id().into_inner()))
            .set((
                documents::content.eq(document.content()),
                documents::updated_at.eq(document.updated_at()),
            ))
            .execute(self.connection)
            .map_err(store_error)?;
        if changed == 0 {
            return Err(TrackerStoreError::missing("document", document.id()));
        }
        Ok(())
    }

    fn list_documents(
        &mut self,
        project: ProjectId,
        filter: &DocumentFilter,
    ) -> TrackerStoreResult<Vec<Document>> {
        let mut query = documents::table
            .filter(documents::project_id.eq(project.into_inner()))
            .select(DocumentRow::as_select())
            .into_boxed();
        if let Some(kind) = filter.kind {
            query = query.filter(documents::kind.eq(kind.as_str()));
        }
        if let Some(search) = filter.search.as_deref() {
            query = query.filter(documents::content.like(like_pattern(search)));
        }
        query
            .order((documents::created_at.asc(), documents::id.asc()))
            .load::<DocumentRow>(self.connection)
            .map_err(store_error)?
            .into_iter()
            .map(row_to_document)
            .collect()
    }
}

fn epic_row(epic: &Epic) -> EpicRow {
    EpicRow {
        id: epic.id().into_inner(),
        project_id: epic.project_id().into_inner(),
        title: epic.title().as_str().to_owned(),
        status: epic.status().as_str().to_owned(),
        created_at: epic.created_at(),
        updated_at: epic.updated_at(),
    }
}

fn story_row(story: &Story) -> StoryRow {
    StoryRow {
        id: story.id().into_inner(),
        epic_id: story.epic_id().into_inner(),
        title: story.title().as_str().to_owned(),
        description: story.description().as_str().to_owned(),
        points: i16::from(story.points().value()),
        priority: story.priority().as_str().to_owned(),
        status: story.status().as_str().to_owned(),
        assignee: story.assignee().map(|assignee| assignee.as_str().to_owned()),
        created_at: story.created_at(),
        updated_at: story.updated_at(),
    }
}

fn sprint_row(sprint: &Sprint) -> SprintRow {
    SprintRow {
        id: sprint.id().into_inner(),
        project_id: sprint.project_id().into_inner(),
        name: sprint.name().as_str().to_owned(),
        status: sprint.status().as_str().to_owned(),
        created_at: sprint.created_at(),
        updated_at: sprint.updated_at(),
    }
}

fn row_to_project(row: ProjectRow) -> TrackerStoreResult<Project> {
    let name = ProjectName::new(row.name).map_err(TrackerStoreError::invalid_persisted_data)?;
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name,
        created_at: row.created_at,
    }))
}

fn row_to_epic(row: EpicRow) -> TrackerStoreResult<Epic> {
    let EpicRow {
        id,
        project_id,
        title,
        status,
        created_at,
        updated_at,
    } = row;
    Ok(Epic::from_persisted(PersistedEpicData {
        id: EpicId::from_uuid(id),
        project_id: ProjectId::from_uuid(project_id),
        title: Title::new(title).map_err(TrackerStoreError::invalid_persisted_data)?,
        status: WorkflowStatus::try_from(status.as_str())
            .map_err(TrackerStoreError::invalid_persisted_data)?,
        created_at,
        updated_at,
    }))
}

fn row_to_story(row: StoryRow) -> TrackerStoreResult<Story> {
    let StoryRow {
        id,
        epic_id,
        title,
        description,
        points,
        priority,
        status,
        assignee,
        created_at,
        updated_at,
    } = row;
    let estimate = u8::try_from(points).map_err(TrackerStoreError::invalid_persisted_data)?;
    Ok(Story::from_persisted(PersistedStoryData {
        id: StoryId::from_uuid(id),
        epic_id: EpicId::from_uuid(epic_id),
        title: Title::new(title).map_err(TrackerStoreError::invalid_persisted_data)?,
        description: StoryDescription::new(description)
            .map_err(TrackerStoreError::invalid_persisted_data)?,
        points: StoryPoints::new(estimate).map_err(TrackerStoreError::invalid_persisted_data)?,
        priority: Priority::try_from(priority.as_str())
            .map_err(TrackerStoreError::invalid_persisted_data)?,
        status: WorkflowStatus::try_from(status.as_str())
            .map_err(TrackerStoreError::invalid_persisted_data)?,
        assignee: assignee
            .map(Assignee::new)
            .transpose()
            .map_err(TrackerStoreError::invalid_persisted_data)?,
        created_at,
        updated_at,
    }))
}

fn row_to_sprint(row: SprintRow) -> TrackerStoreResult<Sprint> {
    let SprintRow {
        id,
        project_id,
        name,
        status,
        created_at,
        updated_at,
    } = row;
    Ok(Sprint::from_persisted(PersistedSprintData {
        id: SprintId::from_uuid(id),
        project_id: ProjectId::from_uuid(project_id),
        name: SprintName::new(name).map_err(TrackerStoreError::invalid_persisted_data)?,
        status: SprintStatus::try_from(status.as_str())
            .map_err(TrackerStoreError::invalid_persisted_data)?,
        created_at,
        updated_at,
    }))
}

fn row_to_comment(row: CommentRow) -> TrackerStoreResult<Comment> {
    let CommentRow {
        id,
        story_id,
        epic_id,
        text,
        author,
        created_at,
    } = row;
    let target = match (story_id, epic_id) {
        (Some(story), None) => CommentTarget::Story(StoryId::from_uuid(story)),
        (None, Some(epic)) => CommentTarget::Epic(EpicId::from_uuid(epic)),
        _ => {
            return Err(TrackerStoreError::invalid_persisted_data(std::io::Error::other(
                format!("comment {id} must target exactly one story or epic"),
            )));
        }
    };
    Ok(Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(id),
        target,
        text: CommentText::new(text).map_err(TrackerStoreError::invalid_persisted_data)?,
        author: author
            .map(CommentAuthor::new)
            .transpose()
            .map_err(TrackerStoreError::invalid_persisted_data)?,
        created_at,
    }))
}

fn row_to_document(row: DocumentRow) -> TrackerStoreResult<Document> {
    let DocumentRow {
        id,
        project_id,
        kind,
        content,
        created_at,
        updated_at,
    } = row;
    Ok(Document::from_persisted(PersistedDocumentData {
        id: DocumentId::from_uuid(id),
        project_id: ProjectId::from_uuid(project_id),
        kind: DocumentKind::try_from(kind.as_str())
            .map_err(TrackerStoreError::invalid_persisted_data)?,
        content,
        created_at,
        updated_at,
    }))
}
