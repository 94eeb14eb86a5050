//! Tool catalogue advertised to agents.

use serde::Serialize;
use serde_json::{Map, Value, json};

/// Name, description and JSON schema of one callable tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDefinition {
    name: &'static str,
    description: &'static str,
    input_schema: Value,
}

impl ToolDefinition {
    const fn new(name: &'static str, description: &'static str, input_schema: Value) -> Self {
        Self {
            name,
            description,
            input_schema,
        }
    }

    /// Returns the tool name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the tool description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Returns the JSON schema of the arguments object.
    #[must_use]
    pub const fn input_schema(&self) -> &Value {
        &self.input_schema
    }
}

fn object(properties: Value, required: &[&str]) -> Value {
    let mut schema = Map::new();
    schema.insert("type".to_owned(), Value::from("object"));
    schema.insert("properties".to_owned(), properties);
    schema.insert("required".to_owned(), Value::from(required.to_vec()));
    schema.insert("additionalProperties".to_owned(), Value::Bool(false));
    Value::Object(schema)
}

fn uuid_field(description: &str) -> Value {
    json!({ "type": "string", "format": "uuid", "description": description })
}

fn status_field() -> Value {
    json!({
        "type": "string",
        "enum": ["backlog", "todo", "in_progress", "in_review", "done"],
    })
}

fn priority_field() -> Value {
    json!({ "type": "string", "enum": ["low", "medium", "high", "critical"] })
}

fn comment_tool(name: &'static str, description: &'static str, target: &str) -> ToolDefinition {
    let mut properties = Map::new();
    properties.insert(
        target.to_owned(),
        uuid_field("Entity the comment is attached to"),
    );
    properties.insert(
        "text".to_owned(),
        json!({ "type": "string", "minLength": 10, "maxLength": 1000 }),
    );
    properties.insert(
        "author".to_owned(),
        json!({ "type": "string", "maxLength": 100 }),
    );
    ToolDefinition::new(
        name,
        description,
        object(Value::Object(properties), &[target, "text"]),
    )
}

/// Returns every tool the registry can call, in catalogue order.
#[must_use]
pub fn catalogue() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "create_project",
            "Create a project with a unique name.",
            object(
                json!({ "name": { "type": "string", "minLength": 3, "maxLength": 100 } }),
                &["name"],
            ),
        ),
        ToolDefinition::new("list_projects", "List all projects.", object(json!({}), &[])),
        ToolDefinition::new(
            "create_epic",
            "Create an epic in a project.",
            object(
                json!({
                    "project_id": uuid_field("Owning project"),
                    "title": { "type": "string", "minLength": 3, "maxLength": 200 },
                }),
                &["project_id", "title"],
            ),
        ),
        ToolDefinition::new(
            "search_epics",
            "List the epics of a project, optionally filtered by title text.",
            object(
                json!({
                    "project_id": uuid_field("Owning project"),
                    "search": { "type": "string" },
                }),
                &["project_id"],
            ),
        ),
        ToolDefinition::new(
            "create_story",
            "Create a story under an epic. New stories start in the backlog.",
            object(
                json!({
                    "epic_id": uuid_field("Owning epic"),
                    "title": { "type": "string", "minLength": 3, "maxLength": 200 },
                    "description": { "type": "string", "minLength": 10, "maxLength": 5000 },
                    "story_points": {
                        "type": "integer",
                        "enum": [0, 1, 2, 3, 5, 8, 13],
                        "default": 0,
                    },
                    "priority": priority_field(),
                }),
                &["epic_id", "title", "description"],
            ),
        ),
        ToolDefinition::new(
            "update_story",
            "Update story fields. A status change may not skip a workflow stage; \
             a null assigned_to clears the assignee.",
            object(
                json!({
                    "story_id": uuid_field("Story to update"),
                    "title": { "type": "string", "minLength": 3, "maxLength": 200 },
                    "description": { "type": "string", "minLength": 10, "maxLength": 5000 },
                    "story_points": { "type": "integer", "enum": [0, 1, 2, 3, 5, 8, 13] },
                    "priority": priority_field(),
                    "status": status_field(),
                    "assigned_to": { "type": ["string", "null"], "maxLength": 100 },
                }),
                &["story_id"],
            ),
        ),
        ToolDefinition::new(
            "list_stories",
            "List the stories of a project with optional filters.",
            object(
                json!({
                    "project_id": uuid_field("Owning project"),
                    "status": status_field(),
                    "priority": priority_field(),
                    "assigned_to": { "type": "string" },
                    "search": { "type": "string" },
                    "limit": { "type": "integer", "minimum": 1, "maximum": 100, "default": 20 },
                }),
                &["project_id"],
            ),
        ),
        ToolDefinition::new(
            "create_sprint",
            "Create a sprint in planning status.",
            object(
                json!({
                    "project_id": uuid_field("Owning project"),
                    "name": { "type": "string", "minLength": 3, "maxLength": 100 },
                }),
                &["project_id", "name"],
            ),
        ),
        ToolDefinition::new(
            "start_sprint",
            "Start a planned sprint.",
            object(json!({ "sprint_id": uuid_field("Sprint to start") }), &["sprint_id"]),
        ),
        ToolDefinition::new(
            "close_sprint",
            "Close a sprint. Fails while member stories are in progress or in review.",
            object(json!({ "sprint_id": uuid_field("Sprint to close") }), &["sprint_id"]),
        ),
        ToolDefinition::new(
            "assign_story_to_sprint",
            "Add a story to a sprint. A story may belong to only one active sprint.",
            object(
                json!({
                    "sprint_id": uuid_field("Target sprint"),
                    "story_id": uuid_field("Story to add"),
                }),
                &["sprint_id", "story_id"],
            ),
        ),
        ToolDefinition::new(
            "remove_story_from_sprint",
            "Remove a story from a sprint.",
            object(
                json!({
                    "sprint_id": uuid_field("Sprint holding the story"),
                    "story_id": uuid_field("Story to remove"),
                }),
                &["sprint_id", "story_id"],
            ),
        ),
        comment_tool("add_comment_to_story", "Comment on a story.", "story_id"),
        comment_tool("add_comment_to_epic", "Comment on an epic.", "epic_id"),
        ToolDefinition::new(
            "create_document",
            "Attach a problem, vision, tdr or retrospective document to a project.",
            object(
                json!({
                    "project_id": uuid_field("Owning project"),
                    "type": {
                        "type": "string",
                        "enum": ["problem", "vision", "tdr", "retrospective"],
                    },
                    "content": { "type": "string" },
                }),
                &["project_id", "type", "content"],
            ),
        ),
    ]
}
