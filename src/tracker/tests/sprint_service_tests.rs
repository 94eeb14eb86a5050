//! Service tests for the sprint lifecycle and membership rules.

use std::sync::Arc;

use crate::tracker::{
    adapters::memory::InMemoryTrackerStore,
    domain::{ProjectId, Sprint, SprintId, SprintStatus, Story, StoryId, WorkflowStatus},
    services::{
        CreateEpicRequest, CreateProjectRequest, CreateSprintRequest, CreateStoryRequest,
        ErrorKind, TrackedEntity, TrackerConflict, TrackerService, TrackerServiceError,
        UpdateStoryRequest,
    },
};
use eyre::{WrapErr, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use uuid::Uuid;

type TestService = TrackerService<InMemoryTrackerStore, DefaultClock>;

struct Board {
    service: TestService,
    project: ProjectId,
    story: Story,
}

#[fixture]
fn service() -> TestService {
    TrackerService::new(Arc::new(InMemoryTrackerStore::new()), Arc::new(DefaultClock))
}

async fn board(service: TestService) -> eyre::Result<Board> {
    let project = service
        .create_project(CreateProjectRequest::new("Sprint board"))
        .await
        .wrap_err("create project")?;
    let epic = service
        .create_epic(CreateEpicRequest::new(project.id(), "Release"))
        .await
        .wrap_err("create epic")?;
    let story = service
        .create_story(CreateStoryRequest::new(
            epic.id(),
            "Ship it",
            "Deliver the release to users",
        ))
        .await
        .wrap_err("create story")?;
    Ok(Board {
        service,
        project: project.id(),
        story,
    })
}

impl Board {
    async fn sprint(&self, name: &str) -> eyre::Result<Sprint> {
        self.service
            .create_sprint(CreateSprintRequest::new(self.project, name))
            .await
            .wrap_err_with(|| format!("create sprint {name}"))
    }

    async fn active_sprint(&self, name: &str) -> eyre::Result<Sprint> {
        let sprint = self.sprint(name).await?;
        self.service
            .start_sprint(sprint.id())
            .await
            .wrap_err_with(|| format!("start sprint {name}"))
    }

    async fn move_story(&self, statuses: &[WorkflowStatus]) -> eyre::Result<()> {
        for status in statuses {
            self.service
                .update_story(
                    self.story.id(),
                    UpdateStoryRequest::default().with_status(*status),
                )
                .await
                .wrap_err_with(|| format!("move story to {status}"))?;
        }
        Ok(())
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn new_sprint_is_planning_and_listed(service: TestService) -> eyre::Result<()> {
    let board = board(service).await?;

    let sprint = board.sprint("Sprint 1").await?;

    ensure!(sprint.status() == SprintStatus::Planning);
    ensure!(board.service.find_sprint(sprint.id()).await? == sprint);
    ensure!(board.service.list_sprints(board.project).await? == vec![sprint]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn starting_twice_or_after_close_is_a_conflict(service: TestService) -> eyre::Result<()> {
    let board = board(service).await?;
    let sprint = board.active_sprint("Sprint 1").await?;
    ensure!(sprint.status() == SprintStatus::Active);

    let again = board
        .service
        .start_sprint(sprint.id())
        .await
        .expect_err("second start");
    ensure!(matches!(
        again,
        TrackerServiceError::Conflict(TrackerConflict::SprintAlreadyActive(_))
    ));
    ensure!(again.to_string().contains("already active"));

    board.service.close_sprint(sprint.id()).await?;
    let reopened = board
        .service
        .start_sprint(sprint.id())
        .await
        .expect_err("start after close");
    ensure!(reopened.to_string().contains("cannot start a closed sprint"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_sprint_is_not_found(service: TestService) -> eyre::Result<()> {
    let board = board(service).await?;
    let missing = SprintId::from_uuid(Uuid::new_v4());

    let started = board.service.start_sprint(missing).await;
    let assigned = board
        .service
        .assign_story_to_sprint(board.story.id(), missing)
        .await;

    ensure!(matches!(
        started,
        Err(TrackerServiceError::NotFound(TrackedEntity::Sprint(id))) if id == missing
    ));
    ensure!(matches!(
        assigned,
        Err(TrackerServiceError::NotFound(TrackedEntity::Sprint(_)))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigning_unknown_story_is_not_found(service: TestService) -> eyre::Result<()> {
    let board = board(service).await?;
    let sprint = board.sprint("Sprint 1").await?;
    let missing = StoryId::from_uuid(Uuid::new_v4());

    let result = board
        .service
        .assign_story_to_sprint(missing, sprint.id())
        .await;

    ensure!(matches!(
        result,
        Err(TrackerServiceError::NotFound(TrackedEntity::Story(id))) if id == missing
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn story_cannot_join_a_second_active_sprint(service: TestService) -> eyre::Result<()> {
    let board = board(service).await?;
    let first = board.active_sprint("Sprint A").await?;
    let second = board.active_sprint("Sprint B").await?;
    board
        .service
        .assign_story_to_sprint(board.story.id(), first.id())
        .await?;

    let err = board
        .service
        .assign_story_to_sprint(board.story.id(), second.id())
        .await
        .expect_err("exclusivity must hold");

    ensure!(matches!(
        &err,
        TrackerServiceError::Conflict(TrackerConflict::InOtherActiveSprint { sprint, .. })
            if *sprint == first.id()
    ));
    ensure!(err.to_string().contains("Sprint A"));
    ensure!(board.service.sprint_stories(second.id()).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn planning_sprint_may_hold_an_active_member_until_started(
    service: TestService,
) -> eyre::Result<()> {
    let board = board(service).await?;
    let active = board.active_sprint("Sprint A").await?;
    let planned = board.sprint("Sprint B").await?;
    board
        .service
        .assign_story_to_sprint(board.story.id(), active.id())
        .await?;

    let assigned = board
        .service
        .assign_story_to_sprint(board.story.id(), planned.id())
        .await;
    ensure!(matches!(
        assigned,
        Err(TrackerServiceError::Conflict(TrackerConflict::InOtherActiveSprint { .. }))
    ));

    board
        .service
        .remove_story_from_sprint(board.story.id(), active.id())
        .await?;
    board
        .service
        .assign_story_to_sprint(board.story.id(), planned.id())
        .await?;
    board
        .service
        .assign_story_to_sprint(board.story.id(), active.id())
        .await?;

    let start = board.service.start_sprint(planned.id()).await;
    ensure!(matches!(
        start,
        Err(TrackerServiceError::Conflict(TrackerConflict::InOtherActiveSprint { sprint, .. }))
            if sprint == active.id()
    ));
    ensure!(board.service.find_sprint(planned.id()).await?.status() == SprintStatus::Planning);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigning_twice_is_a_conflict_without_duplicates(
    service: TestService,
) -> eyre::Result<()> {
    let board = board(service).await?;
    let sprint = board.active_sprint("Sprint A").await?;
    let membership = board
        .service
        .assign_story_to_sprint(board.story.id(), sprint.id())
        .await?;
    ensure!(membership.story_id() == board.story.id());
    ensure!(membership.sprint_id() == sprint.id());

    let err = board
        .service
        .assign_story_to_sprint(board.story.id(), sprint.id())
        .await
        .expect_err("second assignment");

    ensure!(err.to_string().contains("already in this sprint"));
    ensure!(board.service.sprint_stories(sprint.id()).await?.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_leaves_story_status_alone(service: TestService) -> eyre::Result<()> {
    let board = board(service).await?;
    board.move_story(&[WorkflowStatus::Todo]).await?;
    let sprint = board.active_sprint("Sprint A").await?;

    board
        .service
        .assign_story_to_sprint(board.story.id(), sprint.id())
        .await?;
    let story = board.service.find_story(board.story.id()).await?;

    ensure!(story.status() == WorkflowStatus::Todo);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_a_missing_membership_is_not_found(service: TestService) -> eyre::Result<()> {
    let board = board(service).await?;
    let sprint = board.sprint("Sprint A").await?;

    let result = board
        .service
        .remove_story_from_sprint(board.story.id(), sprint.id())
        .await;

    ensure!(matches!(
        result,
        Err(TrackerServiceError::NotFound(TrackedEntity::Membership { .. }))
    ));
    Ok(())
}

#[rstest]
#[case(WorkflowStatus::InProgress)]
#[case(WorkflowStatus::InReview)]
#[tokio::test(flavor = "multi_thread")]
async fn open_member_story_blocks_closure(
    #[case] blocking: WorkflowStatus,
    service: TestService,
) -> eyre::Result<()> {
    let board = board(service).await?;
    let sprint = board.active_sprint("Sprint A").await?;
    board
        .service
        .assign_story_to_sprint(board.story.id(), sprint.id())
        .await?;
    let path: Vec<WorkflowStatus> = [
        WorkflowStatus::Todo,
        WorkflowStatus::InProgress,
        WorkflowStatus::InReview,
    ]
    .into_iter()
    .take(blocking.index())
    .collect();
    board.move_story(&path).await?;

    let err = board
        .service
        .close_sprint(sprint.id())
        .await
        .expect_err("open story blocks closure");

    ensure!(err.kind() == ErrorKind::Conflict);
    ensure!(matches!(
        &err,
        TrackerServiceError::Conflict(TrackerConflict::OpenStories { stories, .. })
            if *stories == vec![board.story.id()]
    ));
    ensure!(board.service.find_sprint(sprint.id()).await?.status() == SprintStatus::Active);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sprint_closes_once_work_is_done(service: TestService) -> eyre::Result<()> {
    let board = board(service).await?;
    let sprint = board.active_sprint("Sprint A").await?;
    board
        .service
        .assign_story_to_sprint(board.story.id(), sprint.id())
        .await?;
    board
        .move_story(&[
            WorkflowStatus::Todo,
            WorkflowStatus::InProgress,
            WorkflowStatus::InReview,
            WorkflowStatus::Done,
        ])
        .await?;

    let closed = board.service.close_sprint(sprint.id()).await?;
    let closed_again = board.service.close_sprint(sprint.id()).await?;

    ensure!(closed.status() == SprintStatus::Closed);
    ensure!(closed_again.id() == closed.id());
    ensure!(closed_again.status() == SprintStatus::Closed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closing_again_rechecks_open_members(service: TestService) -> eyre::Result<()> {
    let board = board(service).await?;
    let sprint = board.active_sprint("Sprint A").await?;
    board.service.close_sprint(sprint.id()).await?;
    board
        .service
        .assign_story_to_sprint(board.story.id(), sprint.id())
        .await?;
    board
        .move_story(&[WorkflowStatus::Todo, WorkflowStatus::InProgress])
        .await?;

    let err = board
        .service
        .close_sprint(sprint.id())
        .await
        .expect_err("an in-progress member must block closing again");

    ensure!(matches!(
        &err,
        TrackerServiceError::Conflict(TrackerConflict::OpenStories { stories, .. })
            if *stories == vec![board.story.id()]
    ));
    ensure!(board.service.find_sprint(sprint.id()).await?.status() == SprintStatus::Closed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_assignments_admit_one_active_sprint(
    service: TestService,
) -> eyre::Result<()> {
    let board = board(service).await?;
    let first = board.active_sprint("Sprint A").await?;
    let second = board.active_sprint("Sprint B").await?;
    let story = board.story.id();

    let attempts = [first.id(), second.id()].map(|sprint| {
        let racer = board.service.clone();
        tokio::spawn(async move { racer.assign_story_to_sprint(story, sprint).await })
    });
    let mut admitted = 0_usize;
    for attempt in attempts {
        match attempt.await.wrap_err("join assignment task")? {
            Ok(_) => admitted += 1,
            Err(err) => ensure!(
                matches!(
                    err,
                    TrackerServiceError::Conflict(TrackerConflict::InOtherActiveSprint { .. })
                ),
                "unexpected rejection: {err}"
            ),
        }
    }

    let members = board.service.sprint_stories(first.id()).await?.len()
        + board.service.sprint_stories(second.id()).await?.len();
    ensure!(admitted == 1);
    ensure!(members == 1);
    Ok(())
}
