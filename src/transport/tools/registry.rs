//! Dispatch of named tool calls onto the tracker service.

use super::{
    definition::{ToolDefinition, catalogue},
    error::{ToolError, ToolErrorKind},
};
use crate::{
    tracker::{
        domain::{
            CommentTarget, DocumentKind, EpicFilter, EpicId, Priority, ProjectId, SprintId,
            StoryFilter, StoryId, WorkflowStatus,
        },
        ports::TrackerStore,
        services::{
            AddCommentRequest, CreateDocumentRequest, CreateEpicRequest, CreateProjectRequest,
            CreateSprintRequest, CreateStoryRequest, DEFAULT_PAGE_LIMIT, ListStoriesRequest,
            TrackerService, UpdateStoryRequest,
        },
    },
    transport::{
        deserialize_some,
        views::{
            CommentView, DocumentView, EpicView, MembershipView, ProjectView, SprintView,
            StoryPageView, StoryView,
        },
    },
};
use mockable::Clock;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value, json};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NoArgs {}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateProjectArgs {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateEpicArgs {
    project_id: Uuid,
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SearchEpicsArgs {
    project_id: Uuid,
    #[serde(default)]
    search: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateStoryArgs {
    epic_id: Uuid,
    title: String,
    description: String,
    #[serde(default)]
    story_points: u8,
    #[serde(default)]
    priority: Priority,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateStoryArgs {
    story_id: Uuid,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    story_points: Option<u8>,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    status: Option<WorkflowStatus>,
    #[serde(default, deserialize_with = "deserialize_some")]
    assigned_to: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ListStoriesArgs {
    project_id: Uuid,
    #[serde(default)]
    status: Option<WorkflowStatus>,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    assigned_to: Option<String>,
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateSprintArgs {
    project_id: Uuid,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SprintArgs {
    sprint_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MembershipArgs {
    sprint_id: Uuid,
    story_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoryCommentArgs {
    story_id: Uuid,
    text: String,
    #[serde(default)]
    author: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EpicCommentArgs {
    epic_id: Uuid,
    text: String,
    #[serde(default)]
    author: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateDocumentArgs {
    project_id: Uuid,
    #[serde(rename = "type")]
    kind: DocumentKind,
    content: String,
}

/// Parses the arguments object; a missing or `null` object counts as `{}`.
fn parse<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    let object = match arguments {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(object)
        .map_err(|err| ToolError::invalid_argument(format!("invalid arguments: {err}")))
}

fn render<T: Serialize>(view: &T) -> Result<Value, ToolError> {
    serde_json::to_value(view).map_err(|err| {
        ToolError::new(
            ToolErrorKind::Internal,
            format!("failed to render result: {err}"),
        )
    })
}

/// Named tool calls over a [`TrackerService`].
///
/// Every tool takes a JSON arguments object and returns the JSON view of the
/// affected entity, or a [`ToolError`] tagged with the failure kind.
pub struct ToolRegistry<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync + 'static,
{
    service: TrackerService<S, C>,
    definitions: Vec<ToolDefinition>,
}

impl<S, C> ToolRegistry<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a registry exposing the full tool catalogue.
    #[must_use]
    pub fn new(service: TrackerService<S, C>) -> Self {
        Self {
            service,
            definitions: catalogue(),
        }
    }

    /// Returns the definitions of all callable tools.
    #[must_use]
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Calls the tool named `name` with a JSON arguments object.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] when the tool is unknown, the arguments do not
    /// parse, or the service rejects the call.
    pub async fn call(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        debug!(tool = name, "tool call");
        match name {
            "create_project" => self.create_project(arguments).await,
            "list_projects" => self.list_projects(arguments).await,
            "create_epic" => self.create_epic(arguments).await,
            "search_epics" => self.search_epics(arguments).await,
            "create_story" => self.create_story(arguments).await,
            "update_story" => self.update_story(arguments).await,
            "list_stories" => self.list_stories(arguments).await,
            "create_sprint" => self.create_sprint(arguments).await,
            "start_sprint" => self.start_sprint(arguments).await,
            "close_sprint" => self.close_sprint(arguments).await,
            "assign_story_to_sprint" => self.assign_story(arguments).await,
            "remove_story_from_sprint" => self.remove_story(arguments).await,
            "add_comment_to_story" => self.add_story_comment(arguments).await,
            "add_comment_to_epic" => self.add_epic_comment(arguments).await,
            "create_document" => self.create_document(arguments).await,
            unknown => Err(ToolError::unknown_tool(unknown)),
        }
    }

    async fn list_projects(&self, arguments: Value) -> Result<Value, ToolError> {
        let NoArgs {} = parse(arguments)?;
        let projects = self.service.list_projects().await?;
        render(&projects.iter().map(ProjectView::from).collect::<Vec<_>>())
    }

    async fn start_sprint(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: SprintArgs = parse(arguments)?;
        let sprint = self
            .service
            .start_sprint(SprintId::from_uuid(args.sprint_id))
            .await?;
        render(&SprintView::from(&sprint))
    }

    async fn close_sprint(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: SprintArgs = parse(arguments)?;
        let sprint = self
            .service
            .close_sprint(SprintId::from_uuid(args.sprint_id))
            .await?;
        render(&SprintView::from(&sprint))
    }

    async fn assign_story(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: MembershipArgs = parse(arguments)?;
        let membership = self
            .service
            .assign_story_to_sprint(
                StoryId::from_uuid(args.story_id),
                SprintId::from_uuid(args.sprint_id),
            )
            .await?;
        render(&MembershipView::from(&membership))
    }

    async fn remove_story(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: MembershipArgs = parse(arguments)?;
        self.service
            .remove_story_from_sprint(
                StoryId::from_uuid(args.story_id),
                SprintId::from_uuid(args.sprint_id),
            )
            .await?;
        Ok(json!({ "message": "removed" }))
    }

    async fn add_story_comment(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: StoryCommentArgs = parse(arguments)?;
        let target = CommentTarget::Story(StoryId::from_uuid(args.story_id));
        self.add_comment(target, args.text, args.author).await
    }

    async fn add_epic_comment(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: EpicCommentArgs = parse(arguments)?;
        let target = CommentTarget::Epic(EpicId::from_uuid(args.epic_id));
        self.add_comment(target, args.text, args.author).await
    }

    async fn create_project(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: CreateProjectArgs = parse(arguments)?;
        let project = self
            .service
            .create_project(CreateProjectRequest::new(args.name))
            .await?;
        render(&ProjectView::from(&project))
    }

    async fn create_epic(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: CreateEpicArgs = parse(arguments)?;
        let request = CreateEpicRequest::new(ProjectId::from_uuid(args.project_id), args.title);
        let epic = self.service.create_epic(request).await?;
        render(&EpicView::from(&epic))
    }

    async fn search_epics(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: SearchEpicsArgs = parse(arguments)?;
        let filter = EpicFilter {
            search: args.search,
            ..EpicFilter::default()
        };
        let epics = self
            .service
            .list_epics(ProjectId::from_uuid(args.project_id), filter)
            .await?;
        render(&epics.iter().map(EpicView::from).collect::<Vec<_>>())
    }

    async fn create_story(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: CreateStoryArgs = parse(arguments)?;
        let request =
            CreateStoryRequest::new(EpicId::from_uuid(args.epic_id), args.title, args.description)
                .with_points(args.story_points)
                .with_priority(args.priority);
        let story = self.service.create_story(request).await?;
        render(&StoryView::from(&story))
    }

    async fn update_story(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: UpdateStoryArgs = parse(arguments)?;
        let mut request = UpdateStoryRequest::default();
        if let Some(title) = args.title {
            request = request.with_title(title);
        }
        if let Some(description) = args.description {
            request = request.with_description(description);
        }
        if let Some(points) = args.story_points {
            request = request.with_points(points);
        }
        if let Some(priority) = args.priority {
            request = request.with_priority(priority);
        }
        if let Some(status) = args.status {
            request = request.with_status(status);
        }
        if let Some(assignee) = args.assigned_to {
            request = request.with_assignee_change(assignee);
        }
        let story = self
            .service
            .update_story(StoryId::from_uuid(args.story_id), request)
            .await?;
        render(&StoryView::from(&story))
    }

    async fn list_stories(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: ListStoriesArgs = parse(arguments)?;
        let filter = StoryFilter {
            status: args.status,
            priority: args.priority,
            assignee: args.assigned_to,
            sprint: None,
            search: args.search,
        };
        let request = ListStoriesRequest::new(ProjectId::from_uuid(args.project_id))
            .with_filter(filter)
            .with_page(0, args.limit.unwrap_or(DEFAULT_PAGE_LIMIT));
        let page = self.service.list_stories(request).await?;
        render(&StoryPageView::from(&page))
    }

    async fn create_sprint(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: CreateSprintArgs = parse(arguments)?;
        let request = CreateSprintRequest::new(ProjectId::from_uuid(args.project_id), args.name);
        let sprint = self.service.create_sprint(request).await?;
        render(&SprintView::from(&sprint))
    }

    async fn add_comment(
        &self,
        target: CommentTarget,
        text: String,
        comment_author: Option<String>,
    ) -> Result<Value, ToolError> {
        let mut request = AddCommentRequest::new(target, text);
        if let Some(author) = comment_author {
            request = request.with_author(author);
        }
        let comment = self.service.add_comment(request).await?;
        render(&CommentView::from(&comment))
    }

    async fn create_document(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: CreateDocumentArgs = parse(arguments)?;
        let request = CreateDocumentRequest::new(
            ProjectId::from_uuid(args.project_id),
            args.kind,
            args.content,
        );
        let document = self.service.create_document(request).await?;
        render(&DocumentView::from(&document))
    }
}
