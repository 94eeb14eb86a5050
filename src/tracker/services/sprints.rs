//! Sprint lifecycle and membership operations.

use super::{
    CreateSprintRequest, TrackedEntity, TrackerConflict, TrackerService, TrackerServiceError,
    TrackerServiceResult, lookup, membership,
};
use crate::tracker::{
    domain::{
        NewSprint, ProjectId, Sprint, SprintId, SprintMembership, SprintName, Story, StoryId,
    },
    ports::TrackerStore,
};
use mockable::Clock;
use tracing::info;

impl<S, C> TrackerService<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a sprint in planning for an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::Domain`] for an invalid name and
    /// [`TrackerServiceError::NotFound`] for an unknown project.
    pub async fn create_sprint(
        &self,
        request: CreateSprintRequest,
    ) -> TrackerServiceResult<Sprint> {
        let project_id = request.project_id;
        let name = SprintName::new(request.name)?;
        let sprint = self
            .run("create_sprint", move |tx, clock| {
                lookup::project(tx, project_id)?;
                Ok(tx.insert_sprint(NewSprint::new(project_id, name, clock))?)
            })
            .await?;
        info!(sprint_id = %sprint.id(), project_id = %project_id, "sprint created");
        Ok(sprint)
    }

    /// Retrieves a sprint.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::NotFound`] for an unknown id.
    pub async fn find_sprint(&self, id: SprintId) -> TrackerServiceResult<Sprint> {
        self.run("find_sprint", move |tx, _| lookup::sprint(tx, id)).await
    }

    /// Lists the sprints of a project, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::NotFound`] for an unknown project.
    pub async fn list_sprints(&self, project_id: ProjectId) -> TrackerServiceResult<Vec<Sprint>> {
        self.run("list_sprints", move |tx, _| {
            lookup::project(tx, project_id)?;
            Ok(tx.list_sprints(project_id)?)
        })
        .await
    }

    /// Lists the stories that have been placed in a sprint.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::NotFound`] for an unknown sprint.
    pub async fn sprint_stories(&self, id: SprintId) -> TrackerServiceResult<Vec<Story>> {
        self.run("sprint_stories", move |tx, _| {
            lookup::sprint(tx, id)?;
            Ok(tx.sprint_stories(id)?)
        })
        .await
    }

    /// Moves a sprint from planning to active.
    ///
    /// A member story that already sits in another active sprint blocks the
    /// start, so no story is ever in two active sprints.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::NotFound`] for an unknown sprint, and
    /// [`TrackerServiceError::Conflict`] when the sprint is active or closed
    /// or a member story is held by another active sprint.
    pub async fn start_sprint(&self, id: SprintId) -> TrackerServiceResult<Sprint> {
        let sprint = self
            .run("start_sprint", move |tx, clock| {
                let mut sprint = lookup::sprint(tx, id)?;
                sprint.start(clock)?;
                for story in tx.sprint_stories(id)? {
                    membership::ensure_not_in_other_active_sprint(tx, story.id(), id)?;
                }
                tx.update_sprint(&sprint)?;
                Ok(sprint)
            })
            .await?;
        info!(sprint_id = %id, "sprint started");
        Ok(sprint)
    }

    /// Closes a sprint whose member stories are not in progress or review.
    ///
    /// The member check runs on every call, including for a sprint that is
    /// already closed.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::NotFound`] for an unknown sprint and
    /// [`TrackerConflict::OpenStories`] naming the stories still open.
    pub async fn close_sprint(&self, id: SprintId) -> TrackerServiceResult<Sprint> {
        let sprint = self
            .run("close_sprint", move |tx, clock| {
                let mut sprint = lookup::sprint(tx, id)?;
                membership::ensure_no_open_stories(tx, id)?;
                sprint.close(clock);
                tx.update_sprint(&sprint)?;
                Ok(sprint)
            })
            .await?;
        info!(sprint_id = %id, "sprint closed");
        Ok(sprint)
    }

    /// Places a story in a sprint.
    ///
    /// The story keeps its status. Membership records are kept after the
    /// sprint closes and form the story's sprint history.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::NotFound`] for an unknown sprint or
    /// story (sprint checked first), and [`TrackerServiceError::Conflict`]
    /// when the story is in another active sprint or already in this one.
    pub async fn assign_story_to_sprint(
        &self,
        story: StoryId,
        sprint: SprintId,
    ) -> TrackerServiceResult<SprintMembership> {
        let record = self
            .run("assign_story_to_sprint", move |tx, clock| {
                lookup::sprint(tx, sprint)?;
                lookup::story(tx, story)?;
                membership::ensure_not_in_other_active_sprint(tx, story, sprint)?;
                if tx.find_membership(story, sprint)?.is_some() {
                    return Err(TrackerConflict::AlreadyInSprint { story, sprint }.into());
                }
                let record = SprintMembership::new(story, sprint, clock);
                tx.insert_membership(&record)?;
                Ok(record)
            })
            .await?;
        info!(story_id = %story, sprint_id = %sprint, "story assigned to sprint");
        Ok(record)
    }

    /// Takes a story out of a sprint.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::NotFound`] when the story is not in
    /// the sprint.
    pub async fn remove_story_from_sprint(
        &self,
        story: StoryId,
        sprint: SprintId,
    ) -> TrackerServiceResult<()> {
        self.run("remove_story_from_sprint", move |tx, _| {
            if tx.delete_membership(story, sprint)? {
                Ok(())
            } else {
                Err(TrackerServiceError::NotFound(TrackedEntity::Membership {
                    story,
                    sprint,
                }))
            }
        })
        .await?;
        info!(story_id = %story, sprint_id = %sprint, "story removed from sprint");
        Ok(())
    }
}
