//! Unit tests for the story workflow rule.

use crate::tracker::domain::{
    InvalidTransition, WORKFLOW_ORDER, WorkflowStatus,
    WorkflowStatus::{Backlog, Done, InProgress, InReview, Todo},
    validate_transition,
};
use rstest::rstest;

#[rstest]
#[case(Backlog, Backlog, true)]
#[case(Backlog, Todo, true)]
#[case(Backlog, InProgress, false)]
#[case(Backlog, InReview, false)]
#[case(Backlog, Done, false)]
#[case(Todo, Backlog, true)]
#[case(Todo, Todo, true)]
#[case(Todo, InProgress, true)]
#[case(Todo, InReview, false)]
#[case(Todo, Done, false)]
#[case(InProgress, Backlog, true)]
#[case(InProgress, Todo, true)]
#[case(InProgress, InProgress, true)]
#[case(InProgress, InReview, true)]
#[case(InProgress, Done, false)]
#[case(InReview, Backlog, true)]
#[case(InReview, Todo, true)]
#[case(InReview, InProgress, true)]
#[case(InReview, InReview, true)]
#[case(InReview, Done, true)]
#[case(Done, Backlog, true)]
#[case(Done, Todo, true)]
#[case(Done, InProgress, true)]
#[case(Done, InReview, true)]
#[case(Done, Done, true)]
fn validate_transition_accepts_only_non_skipping_moves(
    #[case] current: WorkflowStatus,
    #[case] proposed: WorkflowStatus,
    #[case] accepted: bool,
) {
    assert_eq!(validate_transition(current, proposed).is_ok(), accepted);
}

#[rstest]
fn rejection_carries_both_statuses() {
    let result = validate_transition(Backlog, InProgress);

    assert_eq!(
        result,
        Err(InvalidTransition {
            from: Backlog,
            to: InProgress,
        })
    );
}

#[rstest]
fn rejection_message_names_the_skipped_move() {
    let err = validate_transition(Todo, Done).expect_err("todo to done skips a stage");

    assert_eq!(
        err.to_string(),
        "invalid status transition from todo to done (workflow step cannot be skipped)"
    );
}

#[rstest]
fn workflow_order_matches_stage_indices() {
    for (position, status) in WORKFLOW_ORDER.iter().enumerate() {
        assert_eq!(status.index(), position);
    }
}

#[rstest]
#[case(Backlog, false)]
#[case(Todo, false)]
#[case(InProgress, true)]
#[case(InReview, true)]
#[case(Done, false)]
fn only_in_progress_and_in_review_are_open(#[case] status: WorkflowStatus, #[case] open: bool) {
    assert_eq!(status.is_open(), open);
}

#[rstest]
#[case("backlog", Backlog)]
#[case("IN_PROGRESS", InProgress)]
#[case(" in_review ", InReview)]
fn workflow_status_parses_canonical_names(#[case] raw: &str, #[case] expected: WorkflowStatus) {
    assert_eq!(WorkflowStatus::try_from(raw), Ok(expected));
}

#[rstest]
fn workflow_status_rejects_unknown_names() {
    assert!(WorkflowStatus::try_from("blocked").is_err());
}
