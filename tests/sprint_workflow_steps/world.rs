//! Shared world state for sprint workflow BDD scenarios.

use std::{collections::HashMap, sync::Arc};

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::tracker::{
    adapters::memory::InMemoryTrackerStore,
    domain::{ProjectId, Sprint, SprintId, Story, StoryId},
    services::{TrackerService, TrackerServiceError},
};

/// Service type used by the BDD world.
pub type TestTrackerService = TrackerService<InMemoryTrackerStore, DefaultClock>;

/// Scenario world for sprint workflow behaviour tests.
pub struct SprintWorld {
    pub service: TestTrackerService,
    pub project: Option<ProjectId>,
    pub story: Option<Story>,
    pub sprints: HashMap<String, Sprint>,
    pub last_outcome: Option<Result<(), TrackerServiceError>>,
}

impl SprintWorld {
    /// Creates a world backed by an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let service = TrackerService::new(
            Arc::new(InMemoryTrackerStore::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            project: None,
            story: None,
            sprints: HashMap::new(),
            last_outcome: None,
        }
    }

    /// Project created by the scenario background.
    pub fn project_id(&self) -> Result<ProjectId, eyre::Report> {
        self.project
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Story under test.
    pub fn story_id(&self) -> Result<StoryId, eyre::Report> {
        self.story
            .as_ref()
            .map(Story::id)
            .ok_or_else(|| eyre::eyre!("missing story in scenario world"))
    }

    /// Looks up a sprint created earlier in the scenario by name.
    pub fn sprint_id(&self, name: &str) -> Result<SprintId, eyre::Report> {
        self.sprints
            .get(name)
            .map(Sprint::id)
            .ok_or_else(|| eyre::eyre!("unknown sprint '{name}' in scenario"))
    }

    /// Outcome of the most recent `when` step.
    pub fn last_outcome(&self) -> Result<&Result<(), TrackerServiceError>, eyre::Report> {
        self.last_outcome
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no call has been made yet"))
    }
}

impl Default for SprintWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SprintWorld {
    SprintWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
