//! Service tests for projects, epics and documents.

use std::sync::Arc;

use crate::tracker::{
    adapters::memory::InMemoryTrackerStore,
    domain::{DocumentFilter, DocumentId, DocumentKind, EpicFilter, ProjectId, WorkflowStatus},
    services::{
        CreateDocumentRequest, CreateEpicRequest, CreateProjectRequest, ErrorKind,
        TrackedEntity, TrackerConflict, TrackerService, TrackerServiceError, UpdateEpicRequest,
    },
};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use uuid::Uuid;

type TestService = TrackerService<InMemoryTrackerStore, DefaultClock>;

#[fixture]
fn service() -> TestService {
    TrackerService::new(Arc::new(InMemoryTrackerStore::new()), Arc::new(DefaultClock))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projects_are_created_listed_and_found(service: TestService) -> eyre::Result<()> {
    let first = service
        .create_project(CreateProjectRequest::new("Apollo"))
        .await?;
    let second = service
        .create_project(CreateProjectRequest::new("Gemini"))
        .await?;

    ensure!(service.find_project(first.id()).await? == first);
    let listed = service.list_projects().await?;
    ensure!(listed.len() == 2);
    ensure!(listed.contains(&first) && listed.contains(&second));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_project_name_is_a_conflict(service: TestService) -> eyre::Result<()> {
    service
        .create_project(CreateProjectRequest::new("Apollo"))
        .await?;

    let result = service
        .create_project(CreateProjectRequest::new("Apollo"))
        .await;

    ensure!(matches!(
        result,
        Err(TrackerServiceError::Conflict(TrackerConflict::DuplicateProjectName(_)))
    ));
    ensure!(service.list_projects().await?.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn short_project_name_is_a_validation_error(service: TestService) {
    let result = service.create_project(CreateProjectRequest::new("ab")).await;

    assert!(matches!(result, Err(err) if err.kind() == ErrorKind::Validation));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_project_is_not_found(service: TestService) {
    let missing = ProjectId::from_uuid(Uuid::new_v4());

    let found = service.find_project(missing).await;
    let epic = service
        .create_epic(CreateEpicRequest::new(missing, "Lost epic"))
        .await;

    assert!(matches!(
        found,
        Err(TrackerServiceError::NotFound(TrackedEntity::Project(id))) if id == missing
    ));
    assert!(matches!(epic, Err(err) if err.kind() == ErrorKind::NotFound));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn epics_start_in_backlog_and_accept_free_status_changes(
    service: TestService,
) -> eyre::Result<()> {
    let project = service
        .create_project(CreateProjectRequest::new("Apollo"))
        .await?;
    let epic = service
        .create_epic(CreateEpicRequest::new(project.id(), "Lunar landing"))
        .await?;
    ensure!(epic.status() == WorkflowStatus::Backlog);

    let updated = service
        .update_epic(
            epic.id(),
            UpdateEpicRequest::default()
                .with_title("Lunar landing v2")
                .with_status(WorkflowStatus::Done),
        )
        .await?;

    ensure!(updated.status() == WorkflowStatus::Done);
    ensure!(updated.title().as_str() == "Lunar landing v2");
    ensure!(service.find_epic(epic.id()).await? == updated);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn epics_are_filtered_by_status_and_title(service: TestService) -> eyre::Result<()> {
    let project = service
        .create_project(CreateProjectRequest::new("Apollo"))
        .await?;
    let landing = service
        .create_epic(CreateEpicRequest::new(project.id(), "Lunar landing"))
        .await?;
    let launch = service
        .create_epic(CreateEpicRequest::new(project.id(), "Launch window"))
        .await?;
    service
        .update_epic(
            launch.id(),
            UpdateEpicRequest::default().with_status(WorkflowStatus::Todo),
        )
        .await?;

    let searched = service
        .list_epics(
            project.id(),
            EpicFilter {
                search: Some("Lunar".to_owned()),
                ..EpicFilter::default()
            },
        )
        .await?;
    let planned = service
        .list_epics(
            project.id(),
            EpicFilter {
                status: Some(WorkflowStatus::Todo),
                ..EpicFilter::default()
            },
        )
        .await?;

    ensure!(searched == vec![landing]);
    ensure!(planned.len() == 1);
    ensure!(planned.first().map(|epic| epic.id()) == Some(launch.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn documents_are_created_updated_and_filtered(service: TestService) -> eyre::Result<()> {
    let project = service
        .create_project(CreateProjectRequest::new("Apollo"))
        .await?;
    let vision = service
        .create_document(CreateDocumentRequest::new(
            project.id(),
            DocumentKind::Vision,
            "Land on the moon",
        ))
        .await?;
    service
        .create_document(CreateDocumentRequest::new(
            project.id(),
            DocumentKind::Retrospective,
            "What went well",
        ))
        .await?;

    let updated = service
        .update_document(vision.id(), "Land on the moon and return safely")
        .await?;
    ensure!(updated.content() == "Land on the moon and return safely");
    ensure!(updated.kind() == DocumentKind::Vision);
    ensure!(service.find_document(vision.id()).await? == updated);

    let visions = service
        .list_documents(
            project.id(),
            DocumentFilter {
                kind: Some(DocumentKind::Vision),
                ..DocumentFilter::default()
            },
        )
        .await?;
    let searched = service
        .list_documents(
            project.id(),
            DocumentFilter {
                search: Some("went well".to_owned()),
                ..DocumentFilter::default()
            },
        )
        .await?;
    ensure!(visions == vec![updated]);
    ensure!(searched.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_or_unknown_documents_are_rejected(service: TestService) -> eyre::Result<()> {
    let project = service
        .create_project(CreateProjectRequest::new("Apollo"))
        .await?;

    let blank = service
        .create_document(CreateDocumentRequest::new(
            project.id(),
            DocumentKind::Problem,
            "  ",
        ))
        .await;
    let missing = service
        .update_document(DocumentId::from_uuid(Uuid::new_v4()), "New content")
        .await;

    ensure!(matches!(blank, Err(err) if err.kind() == ErrorKind::Validation));
    ensure!(matches!(
        missing,
        Err(TrackerServiceError::NotFound(TrackedEntity::Document(_)))
    ));
    Ok(())
}
