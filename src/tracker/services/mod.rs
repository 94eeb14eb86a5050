//! Application services for the tracker.
//!
//! [`TrackerService`] is the single facade behind every transport. Each
//! operation is one store transaction: existence checks, workflow and
//! membership rules, and writes all happen inside it, so a rejected request
//! leaves the store untouched.

mod documents;
mod error;
mod lookup;
pub mod membership;
mod projects;
mod requests;
mod sprints;
mod stories;

pub use error::{
    ErrorKind, TrackedEntity, TrackerConflict, TrackerServiceError, TrackerServiceResult,
};
pub use requests::{
    AddCommentRequest, CreateDocumentRequest, CreateEpicRequest, CreateProjectRequest,
    CreateSprintRequest, CreateStoryRequest, DEFAULT_PAGE_LIMIT, ListStoriesRequest,
    MAX_PAGE_LIMIT, StoryPage, UpdateEpicRequest, UpdateStoryRequest,
};

use crate::tracker::ports::{TrackerStore, TrackerTransaction};
use mockable::Clock;
use std::sync::Arc;
use tracing::{error, warn};

/// Tracker orchestration service.
pub struct TrackerService<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync + 'static,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for TrackerService<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> TrackerService<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new tracker service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Runs `work` as one store transaction and logs rejected requests.
    async fn run<T, F>(&self, operation: &'static str, work: F) -> TrackerServiceResult<T>
    where
        F: FnOnce(&mut dyn TrackerTransaction, &C) -> TrackerServiceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let clock = Arc::clone(&self.clock);
        let outcome = self
            .store
            .transaction(move |tx| work(tx, &*clock))
            .await;
        if let Err(err) = &outcome {
            match err.kind() {
                ErrorKind::Internal => error!(operation, error = %err, "tracker operation failed"),
                _ => warn!(operation, error = %err, "tracker operation rejected"),
            }
        }
        outcome
    }
}
