//! Behaviour tests for the sprint workflow rules.

#[path = "sprint_workflow_steps/mod.rs"]
mod sprint_workflow_steps_defs;

use rstest_bdd_macros::scenario;
use sprint_workflow_steps_defs::world::{SprintWorld, world};

#[scenario(
    path = "tests/features/sprint_workflow.feature",
    name = "Deliver a story through an active sprint"
)]
#[tokio::test(flavor = "multi_thread")]
async fn deliver_story_through_active_sprint(world: SprintWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/sprint_workflow.feature",
    name = "Assign a story to the same sprint twice"
)]
#[tokio::test(flavor = "multi_thread")]
async fn assign_story_to_same_sprint_twice(world: SprintWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/sprint_workflow.feature",
    name = "Start a sprint that is already active"
)]
#[tokio::test(flavor = "multi_thread")]
async fn start_active_sprint(world: SprintWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/sprint_workflow.feature",
    name = "Start a closed sprint"
)]
#[tokio::test(flavor = "multi_thread")]
async fn start_closed_sprint(world: SprintWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/sprint_workflow.feature",
    name = "Move a finished story back to the backlog"
)]
#[tokio::test(flavor = "multi_thread")]
async fn move_finished_story_back(world: SprintWorld) {
    let _ = world;
}
