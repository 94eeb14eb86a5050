//! Story and comment operations.

use super::{
    AddCommentRequest, CreateStoryRequest, ListStoriesRequest, StoryPage, TrackerService,
    TrackerServiceResult, UpdateStoryRequest, lookup,
};
use crate::tracker::{
    domain::{
        Assignee, Comment, CommentAuthor, CommentTarget, CommentText, NewComment, NewStory,
        Story, StoryDescription, StoryId, StoryPatch, StoryPoints, Title,
    },
    ports::{TrackerStore, TrackerTransaction},
};
use mockable::Clock;
use tracing::info;

fn story_patch(request: UpdateStoryRequest) -> TrackerServiceResult<StoryPatch> {
    let UpdateStoryRequest {
        title,
        description,
        points,
        priority,
        status,
        assignee,
    } = request;
    Ok(StoryPatch {
        title: title.map(Title::new).transpose()?,
        description: description.map(StoryDescription::new).transpose()?,
        points: points.map(StoryPoints::new).transpose()?,
        priority,
        status,
        assignee: assignee
            .map(|value| value.map(Assignee::new).transpose())
            .transpose()?,
    })
}

fn ensure_target(
    tx: &mut dyn TrackerTransaction,
    target: CommentTarget,
) -> TrackerServiceResult<()> {
    match target {
        CommentTarget::Story(id) => lookup::story(tx, id).map(drop),
        CommentTarget::Epic(id) => lookup::epic(tx, id).map(drop),
    }
}

impl<S, C> TrackerService<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a story in the backlog of an existing epic.
    ///
    /// The story starts unassigned with status `backlog`.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::Domain`] for invalid fields and
    /// [`super::TrackerServiceError::NotFound`] for an unknown epic.
    pub async fn create_story(&self, request: CreateStoryRequest) -> TrackerServiceResult<Story> {
        let CreateStoryRequest {
            epic_id,
            title,
            description,
            points,
            priority,
        } = request;
        let checked_title = Title::new(title)?;
        let checked_description = StoryDescription::new(description)?;
        let estimate = StoryPoints::new(points)?;
        let story = self
            .run("create_story", move |tx, clock| {
                lookup::epic(tx, epic_id)?;
                let draft = NewStory::new(
                    epic_id,
                    checked_title,
                    checked_description,
                    estimate,
                    priority,
                    clock,
                );
                Ok(tx.insert_story(draft)?)
            })
            .await?;
        info!(story_id = %story.id(), epic_id = %epic_id, "story created");
        Ok(story)
    }

    /// Retrieves a story.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::NotFound`] for an unknown id.
    pub async fn find_story(&self, id: StoryId) -> TrackerServiceResult<Story> {
        self.run("find_story", move |tx, _| lookup::story(tx, id)).await
    }

    /// Applies a partial update to a story.
    ///
    /// A requested status change is checked against the workflow before any
    /// field is touched; a rejected change leaves the story as it was.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::Domain`] for invalid fields,
    /// [`super::TrackerServiceError::NotFound`] for an unknown story and
    /// [`super::TrackerServiceError::InvalidTransition`] when the status
    /// change skips a stage.
    pub async fn update_story(
        &self,
        id: StoryId,
        request: UpdateStoryRequest,
    ) -> TrackerServiceResult<Story> {
        let patch = story_patch(request)?;
        let (story, previous) = self
            .run("update_story", move |tx, clock| {
                let mut story = lookup::story(tx, id)?;
                let previous = story.status();
                story.apply(patch, clock)?;
                tx.update_story(&story)?;
                Ok((story, previous))
            })
            .await?;
        if previous == story.status() {
            info!(story_id = %id, "story updated");
        } else {
            info!(story_id = %id, from = %previous, to = %story.status(), "story status changed");
        }
        Ok(story)
    }

    /// Lists the stories of a project one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::NotFound`] for an unknown project.
    pub async fn list_stories(
        &self,
        request: ListStoriesRequest,
    ) -> TrackerServiceResult<StoryPage> {
        let ListStoriesRequest {
            project_id,
            filter,
            offset,
            limit,
        } = request;
        let matching = self
            .run("list_stories", move |tx, _| {
                lookup::project(tx, project_id)?;
                Ok(tx.list_stories(project_id, &filter)?)
            })
            .await?;
        let total = matching.len();
        let stories = matching.into_iter().skip(offset).take(limit).collect();
        Ok(StoryPage {
            stories,
            total,
            offset,
            limit,
        })
    }

    /// Comments on a story or an epic.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::Domain`] for invalid text or
    /// author and [`super::TrackerServiceError::NotFound`] for an unknown
    /// target.
    pub async fn add_comment(&self, request: AddCommentRequest) -> TrackerServiceResult<Comment> {
        let AddCommentRequest {
            target,
            text,
            author,
        } = request;
        let body = CommentText::new(text)?;
        let signed_by = author.map(CommentAuthor::new).transpose()?;
        let comment = self
            .run("add_comment", move |tx, clock| {
                ensure_target(tx, target)?;
                Ok(tx.insert_comment(NewComment::new(target, body, signed_by, clock))?)
            })
            .await?;
        info!(comment_id = %comment.id(), target = ?target, "comment added");
        Ok(comment)
    }

    /// Lists the comments on a story or an epic, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::NotFound`] for an unknown target.
    pub async fn list_comments(&self, target: CommentTarget) -> TrackerServiceResult<Vec<Comment>> {
        self.run("list_comments", move |tx, _| {
            ensure_target(tx, target)?;
            Ok(tx.list_comments(target)?)
        })
        .await
    }
}
