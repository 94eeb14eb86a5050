//! Unit tests for service error classification and messages.

use crate::tracker::{
    domain::{
        InvalidTransition, ProjectName, SprintId, SprintTransitionError, StoryId,
        TrackerDomainError, WorkflowStatus,
    },
    ports::TrackerStoreError,
    services::{ErrorKind, TrackedEntity, TrackerConflict, TrackerServiceError},
};
use rstest::rstest;
use uuid::Uuid;

fn sprint_id() -> SprintId {
    SprintId::from_uuid(Uuid::new_v4())
}

#[rstest]
#[case(
    TrackerServiceError::NotFound(TrackedEntity::Sprint(sprint_id())),
    ErrorKind::NotFound
)]
#[case(
    TrackerServiceError::Conflict(TrackerConflict::SprintAlreadyActive(sprint_id())),
    ErrorKind::Conflict
)]
#[case(
    TrackerServiceError::InvalidTransition(InvalidTransition {
        from: WorkflowStatus::Todo,
        to: WorkflowStatus::Done,
    }),
    ErrorKind::InvalidTransition
)]
#[case(
    TrackerServiceError::Domain(TrackerDomainError::EmptyDocumentContent),
    ErrorKind::Validation
)]
#[case(
    TrackerServiceError::Store(TrackerStoreError::Contention),
    ErrorKind::Contention
)]
#[case(
    TrackerServiceError::Store(TrackerStoreError::persistence(std::io::Error::other("down"))),
    ErrorKind::Internal
)]
fn errors_are_classified(#[case] err: TrackerServiceError, #[case] expected: ErrorKind) {
    assert_eq!(err.kind(), expected);
}

#[rstest]
fn duplicate_store_records_become_conflicts() {
    let name = ProjectName::new("Apollo").expect("valid name");
    let story = StoryId::from_uuid(Uuid::new_v4());
    let sprint = sprint_id();

    let duplicate_name = TrackerServiceError::from(TrackerStoreError::DuplicateProjectName(name));
    let duplicate_member =
        TrackerServiceError::from(TrackerStoreError::DuplicateMembership { story, sprint });

    assert!(matches!(
        duplicate_name,
        TrackerServiceError::Conflict(TrackerConflict::DuplicateProjectName(_))
    ));
    assert!(matches!(
        duplicate_member,
        TrackerServiceError::Conflict(TrackerConflict::AlreadyInSprint { .. })
    ));
}

#[rstest]
fn sprint_transition_errors_become_conflicts_with_their_message() {
    let sprint = sprint_id();

    let active = TrackerServiceError::from(SprintTransitionError::AlreadyActive(sprint));
    let closed = TrackerServiceError::from(SprintTransitionError::Closed(sprint));

    assert_eq!(active.kind(), ErrorKind::Conflict);
    assert_eq!(active.to_string(), format!("sprint {sprint} is already active"));
    assert_eq!(
        closed.to_string(),
        format!("cannot start a closed sprint ({sprint})")
    );
}

#[rstest]
fn not_found_names_the_entity() {
    let story = StoryId::from_uuid(Uuid::new_v4());

    let err = TrackerServiceError::NotFound(TrackedEntity::Story(story));

    assert_eq!(err.to_string(), format!("story {story} not found"));
}
