//! Then steps for sprint workflow BDD scenarios.

use super::world::{SprintWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::tracker::{
    domain::{SprintStatus, WorkflowStatus},
    services::{TrackerConflict, TrackerServiceError},
};

#[then("the last call succeeds")]
fn last_call_succeeds(world: &SprintWorld) -> Result<(), eyre::Report> {
    match world.last_outcome()? {
        Ok(()) => Ok(()),
        Err(err) => Err(eyre::eyre!("expected success, got {err}")),
    }
}

#[then(r#"the last call fails with a conflict naming sprint "{name}""#)]
fn conflict_names_sprint(world: &SprintWorld, name: String) -> Result<(), eyre::Report> {
    let expected = world.sprint_id(&name)?;
    let outcome = world.last_outcome()?;

    if !matches!(
        outcome,
        Err(TrackerServiceError::Conflict(TrackerConflict::InOtherActiveSprint { sprint, .. }))
            if *sprint == expected
    ) {
        return Err(eyre::eyre!(
            "expected a conflict naming sprint {name}, got {outcome:?}"
        ));
    }
    Ok(())
}

#[then(r#"the last call fails with a conflict mentioning "{text}""#)]
fn conflict_mentions(world: &SprintWorld, text: String) -> Result<(), eyre::Report> {
    match world.last_outcome()? {
        Err(err @ TrackerServiceError::Conflict(_)) if err.to_string().contains(&text) => Ok(()),
        other => Err(eyre::eyre!(
            "expected a conflict mentioning '{text}', got {other:?}"
        )),
    }
}

#[then("the last call fails with an already in sprint conflict")]
fn already_in_sprint(world: &SprintWorld) -> Result<(), eyre::Report> {
    let outcome = world.last_outcome()?;
    if !matches!(
        outcome,
        Err(TrackerServiceError::Conflict(TrackerConflict::AlreadyInSprint { .. }))
    ) {
        return Err(eyre::eyre!("expected AlreadyInSprint conflict, got {outcome:?}"));
    }
    Ok(())
}

#[then(r#"the last call fails with an invalid transition from "{from}" to "{to}""#)]
fn invalid_transition(world: &SprintWorld, from: String, to: String) -> Result<(), eyre::Report> {
    let outcome = world.last_outcome()?;
    let Err(TrackerServiceError::InvalidTransition(rejected)) = outcome else {
        return Err(eyre::eyre!("expected an invalid transition, got {outcome:?}"));
    };

    if rejected.from.as_str() != from || rejected.to.as_str() != to {
        return Err(eyre::eyre!(
            "expected {from} -> {to}, got {} -> {}",
            rejected.from,
            rejected.to
        ));
    }
    Ok(())
}

#[then("the close is blocked by the story")]
fn close_blocked_by_story(world: &SprintWorld) -> Result<(), eyre::Report> {
    let story = world.story_id()?;
    let outcome = world.last_outcome()?;

    if !matches!(
        outcome,
        Err(TrackerServiceError::Conflict(TrackerConflict::OpenStories { stories, .. }))
            if stories.contains(&story)
    ) {
        return Err(eyre::eyre!("expected open stories to block closure, got {outcome:?}"));
    }
    Ok(())
}

#[then(r#"the story status is "{status}""#)]
fn story_status_is(world: &SprintWorld, status: String) -> Result<(), eyre::Report> {
    let expected = WorkflowStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let stored = run_async(world.service.find_story(world.story_id()?))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then(r#"sprint "{name}" has status "{status}""#)]
fn sprint_status_is(world: &SprintWorld, name: String, status: String) -> Result<(), eyre::Report> {
    let expected = SprintStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid sprint status in scenario: {err}"))?;
    let sprint = run_async(world.service.find_sprint(world.sprint_id(&name)?))?;

    if sprint.status() != expected {
        return Err(eyre::eyre!(
            "expected sprint {name} to be {}, found {}",
            expected.as_str(),
            sprint.status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"sprint "{name}" holds {count} story"#)]
fn sprint_holds(world: &SprintWorld, name: String, count: usize) -> Result<(), eyre::Report> {
    let members = run_async(world.service.sprint_stories(world.sprint_id(&name)?))?;
    if members.len() != count {
        return Err(eyre::eyre!(
            "expected {count} member stories in {name}, found {}",
            members.len()
        ));
    }
    Ok(())
}
