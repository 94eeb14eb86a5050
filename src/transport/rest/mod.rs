//! REST adapter built on axum.
//!
//! Routes follow the resource hierarchy: projects own epics, sprints and
//! documents; epics own stories; stories and epics own comments. Errors are
//! rendered as `{"detail": "..."}` with the status given by
//! [`status_for`].

mod dto;
mod error;
mod extract;
mod handlers;

pub use error::{ApiError, status_for};

use crate::tracker::{ports::TrackerStore, services::TrackerService};
use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use handlers::{
    add_epic_comment, add_story_comment, assign_story, close_sprint, create_document,
    create_epic, create_project, create_sprint, create_story, get_document, get_epic,
    get_project, get_sprint, get_story, list_documents, list_epic_comments, list_epics,
    list_projects, list_sprints, list_stories, list_story_comments, remove_story,
    sprint_stories, start_sprint, update_document, update_epic, update_story,
};
use axum::Json;
use mockable::Clock;
use serde_json::json;
use tracing::debug;

/// Builds the REST router over `service`.
#[must_use]
pub fn router<S, C>(service: TrackerService<S, C>) -> Router
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .route(
            "/projects",
            get(list_projects::<S, C>).post(create_project::<S, C>),
        )
        .route("/projects/{project_id}", get(get_project::<S, C>))
        .route(
            "/projects/{project_id}/epics",
            get(list_epics::<S, C>).post(create_epic::<S, C>),
        )
        .route("/projects/{project_id}/stories", get(list_stories::<S, C>))
        .route(
            "/projects/{project_id}/sprints",
            get(list_sprints::<S, C>).post(create_sprint::<S, C>),
        )
        .route(
            "/projects/{project_id}/documents",
            get(list_documents::<S, C>).post(create_document::<S, C>),
        )
        .route(
            "/epics/{epic_id}",
            get(get_epic::<S, C>).put(update_epic::<S, C>),
        )
        .route("/epics/{epic_id}/stories", post(create_story::<S, C>))
        .route(
            "/epics/{epic_id}/comments",
            get(list_epic_comments::<S, C>).post(add_epic_comment::<S, C>),
        )
        .route(
            "/stories/{story_id}",
            get(get_story::<S, C>).put(update_story::<S, C>),
        )
        .route(
            "/stories/{story_id}/comments",
            get(list_story_comments::<S, C>).post(add_story_comment::<S, C>),
        )
        .route("/sprints/{sprint_id}", get(get_sprint::<S, C>))
        .route("/sprints/{sprint_id}/start", put(start_sprint::<S, C>))
        .route("/sprints/{sprint_id}/close", put(close_sprint::<S, C>))
        .route("/sprints/{sprint_id}/stories", get(sprint_stories::<S, C>))
        .route(
            "/sprints/{sprint_id}/stories/{story_id}",
            put(assign_story::<S, C>).delete(remove_story::<S, C>),
        )
        .route(
            "/documents/{document_id}",
            get(get_document::<S, C>).put(update_document::<S, C>),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(service)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    debug!(%method, %uri, status = response.status().as_u16(), "handled request");
    response
}
