//! Existence checks shared by the service operations.

use super::error::{TrackedEntity, TrackerServiceError, TrackerServiceResult};
use crate::tracker::{
    domain::{
        Document, DocumentId, Epic, EpicId, Project, ProjectId, Sprint, SprintId, Story, StoryId,
    },
    ports::TrackerTransaction,
};

fn found<T>(record: Option<T>, entity: TrackedEntity) -> TrackerServiceResult<T> {
    record.ok_or(TrackerServiceError::NotFound(entity))
}

pub(super) fn project(
    tx: &mut dyn TrackerTransaction,
    id: ProjectId,
) -> TrackerServiceResult<Project> {
    found(tx.find_project(id)?, TrackedEntity::Project(id))
}

pub(super) fn epic(tx: &mut dyn TrackerTransaction, id: EpicId) -> TrackerServiceResult<Epic> {
    found(tx.find_epic(id)?, TrackedEntity::Epic(id))
}

pub(super) fn story(tx: &mut dyn TrackerTransaction, id: StoryId) -> TrackerServiceResult<Story> {
    found(tx.find_story(id)?, TrackedEntity::Story(id))
}

pub(super) fn sprint(
    tx: &mut dyn TrackerTransaction,
    id: SprintId,
) -> TrackerServiceResult<Sprint> {
    found(tx.find_sprint(id)?, TrackedEntity::Sprint(id))
}

pub(super) fn document(
    tx: &mut dyn TrackerTransaction,
    id: DocumentId,
) -> TrackerServiceResult<Document> {
    found(tx.find_document(id)?, TrackedEntity::Document(id))
}
