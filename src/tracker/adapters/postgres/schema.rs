//! Diesel schema for tracker persistence.

diesel::table! {
    /// Projects; names are unique.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Unique project name.
        #[max_length = 100]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Epics grouping the stories of a project.
    epics (id) {
        /// Epic identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Epic title.
        #[max_length = 200]
        title -> Varchar,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Stories; never deleted.
    stories (id) {
        /// Story identifier.
        id -> Uuid,
        /// Owning epic.
        epic_id -> Uuid,
        /// Story title.
        #[max_length = 200]
        title -> Varchar,
        /// Story description.
        #[max_length = 5000]
        description -> Varchar,
        /// Estimate on the 0, 1, 2, 3, 5, 8, 13 scale.
        points -> Int2,
        /// Priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Optional assignee.
        #[max_length = 100]
        assignee -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Sprints of a project.
    sprints (id) {
        /// Sprint identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Sprint name.
        #[max_length = 100]
        name -> Varchar,
        /// Lifecycle state.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last lifecycle change.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Story-to-sprint history, one row per pair.
    sprint_memberships (story_id, sprint_id) {
        /// Member story.
        story_id -> Uuid,
        /// Containing sprint.
        sprint_id -> Uuid,
        /// When the story was placed in the sprint.
        added_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments on exactly one story or epic.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Commented story, when the target is a story.
        story_id -> Nullable<Uuid>,
        /// Commented epic, when the target is an epic.
        epic_id -> Nullable<Uuid>,
        /// Comment body.
        #[max_length = 1000]
        text -> Varchar,
        /// Optional author.
        #[max_length = 100]
        author -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project documents.
    documents (id) {
        /// Document identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Document kind.
        #[max_length = 20]
        kind -> Varchar,
        /// Document body.
        content -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(epics -> projects (project_id));
diesel::joinable!(stories -> epics (epic_id));
diesel::joinable!(sprints -> projects (project_id));
diesel::joinable!(sprint_memberships -> stories (story_id));
diesel::joinable!(sprint_memberships -> sprints (sprint_id));
diesel::joinable!(documents -> projects (project_id));

diesel::allow_tables_to_appear_in_same_query!(
    projects,
    epics,
    stories,
    sprints,
    sprint_memberships,
    comments,
    documents,
);
