use crate::model::{AuthorExistsError, AuthorId};
use async_trait::async_trait;

/// Lookups against the authors service.
#[async_trait]
pub trait AuthorClient: Send + Sync + 'static {
    /// Returns `Ok(false)` only when the authors service reports the author
    /// as not found. Every other failure is an error.
    async fn exists_by_id(&self, id: &AuthorId) -> Result<bool, AuthorExistsError>;
}
