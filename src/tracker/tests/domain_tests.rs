//! Unit tests for tracker domain values and aggregates.

use crate::tracker::domain::{
    Assignee, DocumentKind, EpicId, NewDocument, NewSprint, NewStory, Priority, ProjectId,
    ProjectName, SprintId, SprintName, SprintStatus, SprintTransitionError, StoryDescription,
    StoryId, StoryPatch, StoryPoints, Title, TrackerDomainError, WorkflowStatus,
};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use uuid::Uuid;

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn new_story(clock: &DefaultClock) -> Result<NewStory, TrackerDomainError> {
    Ok(NewStory::new(
        EpicId::from_uuid(Uuid::new_v4()),
        Title::new("Checkout flow")?,
        StoryDescription::new("Customers can pay for their basket")?,
        StoryPoints::new(3)?,
        Priority::High,
        clock,
    ))
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(5)]
#[case(8)]
#[case(13)]
fn story_points_accept_the_scale(#[case] value: u8) {
    assert_eq!(StoryPoints::new(value).map(StoryPoints::value), Ok(value));
}

#[rstest]
#[case(4)]
#[case(6)]
#[case(21)]
fn story_points_reject_values_off_the_scale(#[case] value: u8) {
    assert_eq!(
        StoryPoints::new(value),
        Err(TrackerDomainError::InvalidStoryPoints(value))
    );
}

#[rstest]
fn title_is_trimmed_before_length_check() {
    let title = Title::new("  abc  ").expect("three characters after trimming");

    assert_eq!(title.as_str(), "abc");
    assert!(Title::new("  ab  ").is_err());
}

#[rstest]
fn title_longer_than_limit_reports_lengths() {
    let result = Title::new("x".repeat(201));

    assert_eq!(
        result,
        Err(TrackerDomainError::TextLength {
            field: "title",
            min: 3,
            max: 200,
            actual: 201,
        })
    );
}

#[rstest]
#[case("short", false)]
#[case("long enough text", true)]
fn description_requires_ten_characters(#[case] raw: &str, #[case] valid: bool) {
    assert_eq!(StoryDescription::new(raw).is_ok(), valid);
}

#[rstest]
fn project_and_sprint_names_are_bounded() {
    assert!(ProjectName::new("ab").is_err());
    assert!(ProjectName::new("x".repeat(100)).is_ok());
    assert!(SprintName::new("x".repeat(101)).is_err());
}

#[rstest]
fn assignee_rejects_blank_and_overlong_names() {
    assert!(Assignee::new("   ").is_err());
    assert!(Assignee::new("x".repeat(101)).is_err());
    assert_eq!(Assignee::new(" alice ").map(|a| a.as_str().to_owned()), Ok("alice".to_owned()));
}

#[rstest]
#[case("low", Priority::Low)]
#[case("Critical", Priority::Critical)]
fn priority_parses_names(#[case] raw: &str, #[case] expected: Priority) {
    assert_eq!(Priority::try_from(raw), Ok(expected));
}

#[rstest]
#[case("tdr", DocumentKind::Tdr)]
#[case("retrospective", DocumentKind::Retrospective)]
fn document_kind_parses_names(#[case] raw: &str, #[case] expected: DocumentKind) {
    assert_eq!(DocumentKind::try_from(raw), Ok(expected));
}

#[rstest]
fn new_story_starts_in_backlog_without_assignee(clock: DefaultClock) -> eyre::Result<()> {
    let story = new_story(&clock)?.into_story(StoryId::from_uuid(Uuid::new_v4()));

    ensure!(story.status() == WorkflowStatus::Backlog);
    ensure!(story.assignee().is_none());
    ensure!(story.created_at() == story.updated_at());
    Ok(())
}

#[rstest]
fn story_patch_with_skipping_status_changes_nothing(clock: DefaultClock) -> eyre::Result<()> {
    let mut story = new_story(&clock)?.into_story(StoryId::from_uuid(Uuid::new_v4()));
    let before = story.clone();
    let patch = StoryPatch {
        title: Some(Title::new("Renamed story")?),
        status: Some(WorkflowStatus::Done),
        ..StoryPatch::default()
    };

    let result = story.apply(patch, &clock);

    ensure!(result.is_err());
    ensure!(story == before);
    Ok(())
}

#[rstest]
fn story_patch_applies_every_present_field(clock: DefaultClock) -> eyre::Result<()> {
    let mut story = new_story(&clock)?.into_story(StoryId::from_uuid(Uuid::new_v4()));
    let patch = StoryPatch {
        title: Some(Title::new("Renamed story")?),
        points: Some(StoryPoints::new(8)?),
        status: Some(WorkflowStatus::Todo),
        assignee: Some(Some(Assignee::new("alice")?)),
        ..StoryPatch::default()
    };

    story.apply(patch, &clock)?;

    ensure!(story.title().as_str() == "Renamed story");
    ensure!(story.points().value() == 8);
    ensure!(story.priority() == Priority::High);
    ensure!(story.status() == WorkflowStatus::Todo);
    ensure!(story.assignee().map(Assignee::as_str) == Some("alice"));

    story.apply(
        StoryPatch {
            assignee: Some(None),
            ..StoryPatch::default()
        },
        &clock,
    )?;
    ensure!(story.assignee().is_none());
    Ok(())
}

#[rstest]
fn sprint_lifecycle_is_planning_active_closed(clock: DefaultClock) -> eyre::Result<()> {
    let id = SprintId::from_uuid(Uuid::new_v4());
    let mut sprint = NewSprint::new(
        ProjectId::from_uuid(Uuid::new_v4()),
        SprintName::new("Sprint 1")?,
        &clock,
    )
    .into_sprint(id);
    ensure!(sprint.status() == SprintStatus::Planning);

    sprint.start(&clock)?;
    ensure!(sprint.status() == SprintStatus::Active);
    ensure!(sprint.start(&clock) == Err(SprintTransitionError::AlreadyActive(id)));

    sprint.close(&clock);
    ensure!(sprint.status() == SprintStatus::Closed);
    ensure!(sprint.start(&clock) == Err(SprintTransitionError::Closed(id)));
    Ok(())
}

#[rstest]
fn document_content_must_not_be_blank(clock: DefaultClock) {
    let result = NewDocument::new(
        ProjectId::from_uuid(Uuid::new_v4()),
        DocumentKind::Vision,
        "   ",
        &clock,
    );

    assert_eq!(result, Err(TrackerDomainError::EmptyDocumentContent));
}
