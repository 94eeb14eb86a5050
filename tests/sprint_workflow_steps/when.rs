//! When steps for sprint workflow BDD scenarios.

use super::world::{SprintWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::tracker::{domain::WorkflowStatus, services::UpdateStoryRequest};

#[when(r#"sprint "{name}" is started"#)]
fn start_sprint(world: &mut SprintWorld, name: String) -> Result<(), eyre::Report> {
    let id = world.sprint_id(&name)?;
    let result = run_async(world.service.start_sprint(id));
    if let Ok(ref started) = result {
        world.sprints.insert(name, started.clone());
    }
    world.last_outcome = Some(result.map(|_| ()));
    Ok(())
}

#[when(r#"sprint "{name}" is closed"#)]
fn close_sprint(world: &mut SprintWorld, name: String) -> Result<(), eyre::Report> {
    let id = world.sprint_id(&name)?;
    let result = run_async(world.service.close_sprint(id));
    if let Ok(ref closed) = result {
        world.sprints.insert(name, closed.clone());
    }
    world.last_outcome = Some(result.map(|_| ()));
    Ok(())
}

#[when(r#"the story is assigned to sprint "{name}""#)]
fn assign_story(world: &mut SprintWorld, name: String) -> Result<(), eyre::Report> {
    let sprint = world.sprint_id(&name)?;
    let story = world.story_id()?;
    let result = run_async(world.service.assign_story_to_sprint(story, sprint));
    world.last_outcome = Some(result.map(|_| ()));
    Ok(())
}

#[when(r#"the story is moved to "{status}""#)]
fn move_story(world: &mut SprintWorld, status: String) -> Result<(), eyre::Report> {
    let target = WorkflowStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let story = world.story_id()?;

    let result = run_async(
        world
            .service
            .update_story(story, UpdateStoryRequest::default().with_status(target)),
    );
    if let Ok(ref updated) = result {
        world.story = Some(updated.clone());
    }
    world.last_outcome = Some(result.map(|_| ()));
    Ok(())
}
