//! REST handlers. Each one parses input, calls the service and renders the
//! result.

use super::{
    dto::{
        CommentBody, CreateDocumentBody, CreateEpicBody, CreateProjectBody, CreateSprintBody,
        CreateStoryBody, DocumentQueryParams, EpicQueryParams, REST_PAGE_LIMIT,
        StoryQueryParams, UpdateDocumentBody, UpdateEpicBody, UpdateStoryBody,
    },
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
};
use crate::{
    tracker::{
        domain::{
            CommentTarget, DocumentFilter, DocumentId, EpicFilter, EpicId, ProjectId, SprintId,
            StoryFilter, StoryId,
        },
        ports::TrackerStore,
        services::{
            AddCommentRequest, CreateDocumentRequest, CreateEpicRequest, CreateProjectRequest,
            CreateSprintRequest, CreateStoryRequest, ListStoriesRequest, TrackerService,
            UpdateEpicRequest, UpdateStoryRequest,
        },
    },
    transport::views::{
        CommentView, DocumentView, EpicView, MembershipView, ProjectView, SprintView,
        StoryPageView, StoryView,
    },
};
use axum::{Json, extract::State, http::StatusCode};
use mockable::Clock;
use serde_json::{Value, json};
use uuid::Uuid;

type Service<S, C> = State<TrackerService<S, C>>;
type Created<T> = Result<(StatusCode, Json<T>), ApiError>;
type Reply<T> = Result<Json<T>, ApiError>;

pub(super) async fn create_project<S, C>(
    State(service): Service<S, C>,
    ApiJson(body): ApiJson<CreateProjectBody>,
) -> Created<ProjectView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let project = service
        .create_project(CreateProjectRequest::new(body.name))
        .await?;
    Ok((StatusCode::CREATED, Json(ProjectView::from(&project))))
}

pub(super) async fn list_projects<S, C>(State(service): Service<S, C>) -> Reply<Vec<ProjectView>>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let projects = service.list_projects().await?;
    Ok(Json(projects.iter().map(ProjectView::from).collect()))
}

pub(super) async fn get_project<S, C>(
    State(service): Service<S, C>,
    ApiPath(project_id): ApiPath<Uuid>,
) -> Reply<ProjectView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let project = service.find_project(ProjectId::from_uuid(project_id)).await?;
    Ok(Json(ProjectView::from(&project)))
}

pub(super) async fn create_epic<S, C>(
    State(service): Service<S, C>,
    ApiPath(project_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<CreateEpicBody>,
) -> Created<EpicView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let request = CreateEpicRequest::new(ProjectId::from_uuid(project_id), body.title);
    let epic = service.create_epic(request).await?;
    Ok((StatusCode::CREATED, Json(EpicView::from(&epic))))
}

pub(super) async fn list_epics<S, C>(
    State(service): Service<S, C>,
    ApiPath(project_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<EpicQueryParams>,
) -> Reply<Vec<EpicView>>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let filter = EpicFilter {
        status: query.status,
        search: query.search,
    };
    let epics = service
        .list_epics(ProjectId::from_uuid(project_id), filter)
        .await?;
    Ok(Json(epics.iter().map(EpicView::from).collect()))
}

pub(super) async fn get_epic<S, C>(
    State(service): Service<S, C>,
    ApiPath(epic_id): ApiPath<Uuid>,
) -> Reply<EpicView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let epic = service.find_epic(EpicId::from_uuid(epic_id)).await?;
    Ok(Json(EpicView::from(&epic)))
}

pub(super) async fn update_epic<S, C>(
    State(service): Service<S, C>,
    ApiPath(epic_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateEpicBody>,
) -> Reply<EpicView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let mut request = UpdateEpicRequest::default();
    if let Some(title) = body.title {
        request = request.with_title(title);
    }
    if let Some(status) = body.status {
        request = request.with_status(status);
    }
    let epic = service
        .update_epic(EpicId::from_uuid(epic_id), request)
        .await?;
    Ok(Json(EpicView::from(&epic)))
}

pub(super) async fn create_story<S, C>(
    State(service): Service<S, C>,
    ApiPath(epic_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<CreateStoryBody>,
) -> Created<StoryView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let request = CreateStoryRequest::new(EpicId::from_uuid(epic_id), body.title, body.description)
        .with_points(body.story_points)
        .with_priority(body.priority);
    let story = service.create_story(request).await?;
    Ok((StatusCode::CREATED, Json(StoryView::from(&story))))
}

pub(super) async fn get_story<S, C>(
    State(service): Service<S, C>,
    ApiPath(story_id): ApiPath<Uuid>,
) -> Reply<StoryView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let story = service.find_story(StoryId::from_uuid(story_id)).await?;
    Ok(Json(StoryView::from(&story)))
}

fn update_story_request(body: UpdateStoryBody) -> UpdateStoryRequest {
    let mut request = UpdateStoryRequest::default();
    if let Some(title) = body.title {
        request = request.with_title(title);
    }
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    if let Some(points) = body.story_points {
        request = request.with_points(points);
    }
    if let Some(priority) = body.priority {
        request = request.with_priority(priority);
    }
    if let Some(status) = body.status {
        request = request.with_status(status);
    }
    if let Some(assignee) = body.assigned_to {
        request = request.with_assignee_change(assignee);
    }
    request
}

pub(super) async fn update_story<S, C>(
    State(service): Service<S, C>,
    ApiPath(story_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateStoryBody>,
) -> Reply<StoryView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let story = service
        .update_story(StoryId::from_uuid(story_id), update_story_request(body))
        .await?;
    Ok(Json(StoryView::from(&story)))
}

pub(super) async fn list_stories<S, C>(
    State(service): Service<S, C>,
    ApiPath(project_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<StoryQueryParams>,
) -> Reply<StoryPageView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let filter = StoryFilter {
        status: query.status,
        priority: query.priority,
        assignee: query.assigned_to,
        sprint: query.sprint_id.map(SprintId::from_uuid),
        search: query.search,
    };
    let request = ListStoriesRequest::new(ProjectId::from_uuid(project_id))
        .with_filter(filter)
        .with_page(
            query.offset.unwrap_or(0),
            query.limit.unwrap_or(REST_PAGE_LIMIT),
        );
    let page = service.list_stories(request).await?;
    Ok(Json(StoryPageView::from(&page)))
}

pub(super) async fn create_sprint<S, C>(
    State(service): Service<S, C>,
    ApiPath(project_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<CreateSprintBody>,
) -> Created<SprintView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let request = CreateSprintRequest::new(ProjectId::from_uuid(project_id), body.name);
    let sprint = service.create_sprint(request).await?;
    Ok((StatusCode::CREATED, Json(SprintView::from(&sprint))))
}

pub(super) async fn list_sprints<S, C>(
    State(service): Service<S, C>,
    ApiPath(project_id): ApiPath<Uuid>,
) -> Reply<Vec<SprintView>>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let sprints = service
        .list_sprints(ProjectId::from_uuid(project_id))
        .await?;
    Ok(Json(sprints.iter().map(SprintView::from).collect()))
}

pub(super) async fn get_sprint<S, C>(
    State(service): Service<S, C>,
    ApiPath(sprint_id): ApiPath<Uuid>,
) -> Reply<SprintView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let sprint = service.find_sprint(SprintId::from_uuid(sprint_id)).await?;
    Ok(Json(SprintView::from(&sprint)))
}

pub(super) async fn start_sprint<S, C>(
    State(service): Service<S, C>,
    ApiPath(sprint_id): ApiPath<Uuid>,
) -> Reply<SprintView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let sprint = service.start_sprint(SprintId::from_uuid(sprint_id)).await?;
    Ok(Json(SprintView::from(&sprint)))
}

pub(super) async fn close_sprint<S, C>(
    State(service): Service<S, C>,
    ApiPath(sprint_id): ApiPath<Uuid>,
) -> Reply<SprintView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let sprint = service.close_sprint(SprintId::from_uuid(sprint_id)).await?;
    Ok(Json(SprintView::from(&sprint)))
}

pub(super) async fn sprint_stories<S, C>(
    State(service): Service<S, C>,
    ApiPath(sprint_id): ApiPath<Uuid>,
) -> Reply<Vec<StoryView>>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let stories = service
        .sprint_stories(SprintId::from_uuid(sprint_id))
        .await?;
    Ok(Json(stories.iter().map(StoryView::from).collect()))
}

pub(super) async fn assign_story<S, C>(
    State(service): Service<S, C>,
    ApiPath((sprint_id, story_id)): ApiPath<(Uuid, Uuid)>,
) -> Reply<MembershipView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let membership = service
        .assign_story_to_sprint(StoryId::from_uuid(story_id), SprintId::from_uuid(sprint_id))
        .await?;
    Ok(Json(MembershipView::from(&membership)))
}

pub(super) async fn remove_story<S, C>(
    State(service): Service<S, C>,
    ApiPath((sprint_id, story_id)): ApiPath<(Uuid, Uuid)>,
) -> Reply<Value>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    service
        .remove_story_from_sprint(StoryId::from_uuid(story_id), SprintId::from_uuid(sprint_id))
        .await?;
    Ok(Json(json!({ "message": "removed" })))
}

async fn add_comment<S, C>(
    service: &TrackerService<S, C>,
    target: CommentTarget,
    body: CommentBody,
) -> Created<CommentView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let mut request = AddCommentRequest::new(target, body.text);
    if let Some(author) = body.author {
        request = request.with_author(author);
    }
    let comment = service.add_comment(request).await?;
    Ok((StatusCode::CREATED, Json(CommentView::from(&comment))))
}

async fn list_comments<S, C>(
    service: &TrackerService<S, C>,
    target: CommentTarget,
) -> Reply<Vec<CommentView>>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let comments = service.list_comments(target).await?;
    Ok(Json(comments.iter().map(CommentView::from).collect()))
}

pub(super) async fn add_story_comment<S, C>(
    State(service): Service<S, C>,
    ApiPath(story_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<CommentBody>,
) -> Created<CommentView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    add_comment(&service, CommentTarget::Story(StoryId::from_uuid(story_id)), body).await
}

pub(super) async fn list_story_comments<S, C>(
    State(service): Service<S, C>,
    ApiPath(story_id): ApiPath<Uuid>,
) -> Reply<Vec<CommentView>>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    list_comments(&service, CommentTarget::Story(StoryId::from_uuid(story_id))).await
}

pub(super) async fn add_epic_comment<S, C>(
    State(service): Service<S, C>,
    ApiPath(epic_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<CommentBody>,
) -> Created<CommentView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    add_comment(&service, CommentTarget::Epic(EpicId::from_uuid(epic_id)), body).await
}

pub(super) async fn list_epic_comments<S, C>(
    State(service): Service<S, C>,
    ApiPath(epic_id): ApiPath<Uuid>,
) -> Reply<Vec<CommentView>>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    list_comments(&service, CommentTarget::Epic(EpicId::from_uuid(epic_id))).await
}

pub(super) async fn create_document<S, C>(
    State(service): Service<S, C>,
    ApiPath(project_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<CreateDocumentBody>,
) -> Created<DocumentView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let request =
        CreateDocumentRequest::new(ProjectId::from_uuid(project_id), body.kind, body.content);
    let document = service.create_document(request).await?;
    Ok((StatusCode::CREATED, Json(DocumentView::from(&document))))
}

pub(super) async fn list_documents<S, C>(
    State(service): Service<S, C>,
    ApiPath(project_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<DocumentQueryParams>,
) -> Reply<Vec<DocumentView>>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let filter = DocumentFilter {
        kind: query.kind,
        search: query.search,
    };
    let documents = service
        .list_documents(ProjectId::from_uuid(project_id), filter)
        .await?;
    Ok(Json(documents.iter().map(DocumentView::from).collect()))
}

pub(super) async fn get_document<S, C>(
    State(service): Service<S, C>,
    ApiPath(document_id): ApiPath<Uuid>,
) -> Reply<DocumentView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let document = service
        .find_document(DocumentId::from_uuid(document_id))
        .await?;
    Ok(Json(DocumentView::from(&document)))
}

pub(super) async fn update_document<S, C>(
    State(service): Service<S, C>,
    ApiPath(document_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateDocumentBody>,
) -> Reply<DocumentView>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let document = service
        .update_document(DocumentId::from_uuid(document_id), body.content)
        .await?;
    Ok(Json(DocumentView::from(&document)))
}
