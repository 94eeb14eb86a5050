//! Project document operations.

use super::{CreateDocumentRequest, TrackerService, TrackerServiceResult, lookup};
use crate::tracker::{
    domain::{Document, DocumentFilter, DocumentId, NewDocument, ProjectId},
    ports::TrackerStore,
};
use mockable::Clock;
use tracing::info;

impl<S, C> TrackerService<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync + 'static,
{
    /// Attaches a document to a project.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::Domain`] for blank content and
    /// [`super::TrackerServiceError::NotFound`] for an unknown project.
    pub async fn create_document(
        &self,
        request: CreateDocumentRequest,
    ) -> TrackerServiceResult<Document> {
        let CreateDocumentRequest {
            project_id,
            kind,
            content,
        } = request;
        let document = self
            .run("create_document", move |tx, clock| {
                lookup::project(tx, project_id)?;
                let draft = NewDocument::new(project_id, kind, content, clock)?;
                Ok(tx.insert_document(draft)?)
            })
            .await?;
        info!(document_id = %document.id(), kind = %kind, "document created");
        Ok(document)
    }

    /// Retrieves a document.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::NotFound`] for an unknown id.
    pub async fn find_document(&self, id: DocumentId) -> TrackerServiceResult<Document> {
        self.run("find_document", move |tx, _| lookup::document(tx, id))
            .await
    }

    /// Replaces the content of a document.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::Domain`] for blank content and
    /// [`super::TrackerServiceError::NotFound`] for an unknown document.
    pub async fn update_document(
        &self,
        id: DocumentId,
        content: impl Into<String>,
    ) -> TrackerServiceResult<Document> {
        let replacement = content.into();
        let document = self
            .run("update_document", move |tx, clock| {
                let mut stored = lookup::document(tx, id)?;
                stored.replace_content(replacement, clock)?;
                tx.update_document(&stored)?;
                Ok(stored)
            })
            .await?;
        info!(document_id = %id, "document updated");
        Ok(document)
    }

    /// Lists the documents of a project.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::NotFound`] for an unknown project.
    pub async fn list_documents(
        &self,
        project_id: ProjectId,
        filter: DocumentFilter,
    ) -> TrackerServiceResult<Vec<Document>> {
        self.run("list_documents", move |tx, _| {
            lookup::project(tx, project_id)?;
            Ok(tx.list_documents(project_id, &filter)?)
        })
        .await
    }
}
