use crate::client::AuthorClient;
use crate::model::{
    ChangeStatusError, ChangeStatusRequest, CreatePublicationError, CreatePublicationRequest,
    FindAllPublicationsError, FindPublicationError, FindPublicationRequest, Publication,
    PublicationId,
};
use crate::store::PublicationRepository;

/// Publication use cases. Author references are checked against the
/// authors service before anything is stored.
#[derive(Debug)]
pub struct PublicationService<PR, AC> {
    publication_repo: PR,
    author_client: AC,
}

impl<PR, AC> PublicationService<PR, AC>
where
    PR: PublicationRepository,
    AC: AuthorClient,
{
    pub const fn new(publication_repo: PR, author_client: AC) -> Self {
        Self {
            publication_repo,
            author_client,
        }
    }

    pub async fn create_publication(
        &self,
        req: &CreatePublicationRequest,
    ) -> Result<Publication, CreatePublicationError> {
        let author_id = req.author_id();
        let exists = self.author_client.exists_by_id(&author_id).await?;
        tracing::debug!(author_id = %author_id, exists, "Checked author existence");
        if !exists {
            return Err(CreatePublicationError::UnknownAuthor { id: author_id });
        }

        let publication = Publication::draft(PublicationId::generate(), req);
        self.publication_repo.create_publication(&publication).await
    }

    pub async fn find_publication(
        &self,
        req: &FindPublicationRequest,
    ) -> Result<Publication, FindPublicationError> {
        self.publication_repo.find_publication(req).await
    }

    pub async fn find_all_publications(
        &self,
    ) -> Result<Vec<Publication>, FindAllPublicationsError> {
        self.publication_repo.find_all_publications().await
    }

    pub async fn change_status(
        &self,
        req: &ChangeStatusRequest,
    ) -> Result<Publication, ChangeStatusError> {
        self.publication_repo.change_status(req).await
    }
}
