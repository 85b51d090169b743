use crate::client::AuthorClient;
use crate::model::{AuthorExistsError, AuthorId};
use anyhow::{anyhow, bail};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

/// [`AuthorClient`] backed by the authors service REST API.
#[derive(Debug, Clone)]
pub struct HttpAuthorClient {
    client: Client,
    base_url: Url,
}

impl HttpAuthorClient {
    /// Requests go to `{base_url}/authors/{id}`. Any query or fragment on
    /// `base_url` is dropped.
    pub fn new(client: Client, mut base_url: Url) -> anyhow::Result<Self> {
        if base_url.cannot_be_a_base() {
            bail!("Authors service URL {base_url} cannot be used as a base URL");
        }
        base_url.set_query(None);
        base_url.set_fragment(None);
        Ok(Self { client, base_url })
    }

    pub fn author_url(&self, id: &AuthorId) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so the segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("authors").push(&id.to_string());
        }
        debug_assert!(url.path().ends_with(&id.to_string()));
        url
    }
}

#[async_trait]
impl AuthorClient for HttpAuthorClient {
    async fn exists_by_id(&self, id: &AuthorId) -> Result<bool, AuthorExistsError> {
        let response = self
            .client
            .get(self.author_url(id))
            .send()
            .await
            .map_err(|err| {
                let err = anyhow!(err).context(format!(
                    r#"Failed to check existence of author with id "{id}""#
                ));
                AuthorExistsError::Other(err)
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            Ok(false)
        } else if status.is_client_error() || status.is_server_error() {
            Err(AuthorExistsError::UnexpectedStatus {
                id: *id,
                status: status.as_u16(),
            })
        } else {
            Ok(true)
        }
    }
}
