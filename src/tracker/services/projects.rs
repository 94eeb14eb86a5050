//! Project and epic operations.

use super::{
    CreateEpicRequest, CreateProjectRequest, TrackerConflict, TrackerService,
    TrackerServiceResult, UpdateEpicRequest, lookup,
};
use crate::tracker::{
    domain::{
        Epic, EpicFilter, EpicId, EpicPatch, NewEpic, NewProject, Project, ProjectId,
        ProjectName, Title,
    },
    ports::TrackerStore,
};
use mockable::Clock;
use tracing::info;

impl<S, C> TrackerService<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a project with a unique name.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::Domain`] for an invalid name and
    /// [`TrackerConflict::DuplicateProjectName`] when the name is taken.
    pub async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> TrackerServiceResult<Project> {
        let name = ProjectName::new(request.name)?;
        let project = self
            .run("create_project", move |tx, clock| {
                if tx.find_project_by_name(&name)?.is_some() {
                    return Err(TrackerConflict::DuplicateProjectName(name).into());
                }
                Ok(tx.insert_project(NewProject::new(name, clock))?)
            })
            .await?;
        info!(project_id = %project.id(), name = %project.name(), "project created");
        Ok(project)
    }

    /// Retrieves a project.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::NotFound`] for an unknown id.
    pub async fn find_project(&self, id: ProjectId) -> TrackerServiceResult<Project> {
        self.run("find_project", move |tx, _| lookup::project(tx, id))
            .await
    }

    /// Lists every project, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::Store`] when the store fails.
    pub async fn list_projects(&self) -> TrackerServiceResult<Vec<Project>> {
        self.run("list_projects", |tx, _| Ok(tx.list_projects()?))
            .await
    }

    /// Creates an epic in the backlog of an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::Domain`] for an invalid title and
    /// [`super::TrackerServiceError::NotFound`] for an unknown project.
    pub async fn create_epic(&self, request: CreateEpicRequest) -> TrackerServiceResult<Epic> {
        let project_id = request.project_id;
        let title = Title::new(request.title)?;
        let epic = self
            .run("create_epic", move |tx, clock| {
                lookup::project(tx, project_id)?;
                Ok(tx.insert_epic(NewEpic::new(project_id, title, clock))?)
            })
            .await?;
        info!(epic_id = %epic.id(), project_id = %project_id, "epic created");
        Ok(epic)
    }

    /// Retrieves an epic.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::NotFound`] for an unknown id.
    pub async fn find_epic(&self, id: EpicId) -> TrackerServiceResult<Epic> {
        self.run("find_epic", move |tx, _| lookup::epic(tx, id)).await
    }

    /// Changes the title or status of an epic.
    ///
    /// Epic status is not subject to the story workflow rule.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::Domain`] for an invalid title and
    /// [`super::TrackerServiceError::NotFound`] for an unknown epic.
    pub async fn update_epic(
        &self,
        id: EpicId,
        request: UpdateEpicRequest,
    ) -> TrackerServiceResult<Epic> {
        let patch = EpicPatch {
            title: request.title.map(Title::new).transpose()?,
            status: request.status,
        };
        let epic = self
            .run("update_epic", move |tx, clock| {
                let mut epic = lookup::epic(tx, id)?;
                epic.apply(patch, clock);
                tx.update_epic(&epic)?;
                Ok(epic)
            })
            .await?;
        info!(epic_id = %id, status = %epic.status(), "epic updated");
        Ok(epic)
    }

    /// Lists the epics of a project.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::NotFound`] for an unknown project.
    pub async fn list_epics(
        &self,
        project_id: ProjectId,
        filter: EpicFilter,
    ) -> TrackerServiceResult<Vec<Epic>> {
        self.run("list_epics", move |tx, _| {
            lookup::project(tx, project_id)?;
            Ok(tx.list_epics(project_id, &filter)?)
        })
        .await
    }
}
