//! Given steps for sprint workflow BDD scenarios.

use super::world::{SprintWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::tracker::services::{
    CreateEpicRequest, CreateProjectRequest, CreateSprintRequest, CreateStoryRequest,
};

#[given(r#"a story "{title}" in project "{project}""#)]
fn story_in_project(
    world: &mut SprintWorld,
    title: String,
    project: String,
) -> Result<(), eyre::Report> {
    let created_project = run_async(
        world
            .service
            .create_project(CreateProjectRequest::new(project)),
    )
    .wrap_err("create project")?;
    let epic = run_async(
        world
            .service
            .create_epic(CreateEpicRequest::new(created_project.id(), "Roadmap")),
    )
    .wrap_err("create epic")?;
    let request =
        CreateStoryRequest::new(epic.id(), title, "Scenario story for the sprint board")
            .with_points(3);
    let story = run_async(world.service.create_story(request)).wrap_err("create story")?;

    world.project = Some(created_project.id());
    world.story = Some(story);
    Ok(())
}

#[given(r#"a planning sprint "{name}""#)]
fn planning_sprint(world: &mut SprintWorld, name: String) -> Result<(), eyre::Report> {
    let project = world.project_id()?;
    let sprint = run_async(
        world
            .service
            .create_sprint(CreateSprintRequest::new(project, name.clone())),
    )
    .wrap_err_with(|| format!("create sprint {name}"))?;
    world.sprints.insert(name, sprint);
    Ok(())
}

#[given(r#"an active sprint "{name}""#)]
fn active_sprint(world: &mut SprintWorld, name: String) -> Result<(), eyre::Report> {
    planning_sprint(world, name.clone())?;
    let id = world.sprint_id(&name)?;
    let started = run_async(world.service.start_sprint(id))
        .wrap_err_with(|| format!("start sprint {name}"))?;
    world.sprints.insert(name, started);
    Ok(())
}
