//! Diesel row models for tracker persistence.

use super::schema::{comments, documents, epics, projects, sprint_memberships, sprints, stories};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Row of the `projects` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Row of the `epics` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = epics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EpicRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the `stories` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = stories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StoryRow {
    pub id: Uuid,
    pub epic_id: Uuid,
    pub title: String,
    pub description: String,
    pub points: i16,
    pub priority: String,
    pub status: String,
    pub assignee: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the `sprints` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = sprints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SprintRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the `sprint_memberships` table.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = sprint_memberships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MembershipRow {
    pub story_id: Uuid,
    pub sprint_id: Uuid,
    pub added_at: DateTime<Utc>,
}

/// Row of the `comments` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    pub id: Uuid,
    pub story_id: Option<Uuid>,
    pub epic_id: Option<Uuid>,
    pub text: String,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row of the `documents` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub kind: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
