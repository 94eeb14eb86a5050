//! Sprint membership guard.
//!
//! Both checks run inside the caller's store transaction so that the state
//! they inspect is the state the caller goes on to modify.

use super::error::{TrackerConflict, TrackerServiceResult};
use crate::tracker::{
    domain::{SprintId, Story, StoryId, WorkflowStatus},
    ports::TrackerTransaction,
};

/// Statuses that keep a sprint from closing.
pub const OPEN_STATUSES: [WorkflowStatus; 2] =
    [WorkflowStatus::InProgress, WorkflowStatus::InReview];

/// Fails when `story` belongs to an active sprint other than `target`.
///
/// # Errors
///
/// Returns [`TrackerConflict::InOtherActiveSprint`] naming the other sprint,
/// or a store error.
pub fn ensure_not_in_other_active_sprint(
    tx: &mut dyn TrackerTransaction,
    story: StoryId,
    target: SprintId,
) -> TrackerServiceResult<()> {
    let active = tx.active_sprints_containing(story)?;
    match active.into_iter().find(|sprint| sprint.id() != target) {
        Some(other) => Err(TrackerConflict::InOtherActiveSprint {
            story,
            sprint: other.id(),
            sprint_name: other.name().clone(),
        }
        .into()),
        None => Ok(()),
    }
}

/// Fails when any member story of `sprint` is in progress or in review.
///
/// # Errors
///
/// Returns [`TrackerConflict::OpenStories`] naming the open stories, or a
/// store error.
pub fn ensure_no_open_stories(
    tx: &mut dyn TrackerTransaction,
    sprint: SprintId,
) -> TrackerServiceResult<()> {
    let open = tx.sprint_stories_with_status(sprint, &OPEN_STATUSES)?;
    if open.is_empty() {
        return Ok(());
    }
    Err(TrackerConflict::OpenStories {
        sprint,
        stories: open.iter().map(Story::id).collect(),
    }
    .into())
}
