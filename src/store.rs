use crate::model::{
    ChangeStatusError, ChangeStatusRequest, CreatePublicationError, FindAllPublicationsError,
    FindPublicationError, FindPublicationRequest, Publication,
};
use async_trait::async_trait;

#[async_trait]
pub trait PublicationRepository: Send + Sync + 'static {
    async fn create_publication(
        &self,
        publication: &Publication,
    ) -> Result<Publication, CreatePublicationError>;

    async fn find_publication(
        &self,
        req: &FindPublicationRequest,
    ) -> Result<Publication, FindPublicationError>;

    async fn find_all_publications(&self) -> Result<Vec<Publication>, FindAllPublicationsError>;

    /// Moving to `PUBLISHED` stamps the publication date the first time.
    async fn change_status(
        &self,
        req: &ChangeStatusRequest,
    ) -> Result<Publication, ChangeStatusError>;
}
