use crate::client::AuthorClient;
use crate::http::AppState;
use crate::model::{
    AuthorIdError, ChangeStatusError, ChangeStatusRequest, CreatePublicationError,
    CreatePublicationRequest, EditorialStatusError, FindAllPublicationsError,
    FindPublicationError, FindPublicationRequest, Publication, PublicationIdError,
    PublicationTypeError, RequiredText, RequiredTextEmptyError,
};
use crate::store::PublicationRepository;
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<ApiResponse<T>>);

impl<T: Serialize> ApiSuccess<T> {
    pub const fn new(status: StatusCode, data: T) -> Self {
        Self(status, Json(ApiResponse::new(status, data)))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> axum::response::Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    status_code: u16,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    const fn new(status: StatusCode, data: T) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    BadGateway(String),
    InternalServerError(String),
    NotFound(String),
    UnprocessableEntity(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, msg) = match self {
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        };
        (status, Json(ApiResponse::new(status, msg))).into_response()
    }
}

fn internal_server_error(cause: &anyhow::Error) -> ApiError {
    tracing::error!("{cause:?}");
    ApiError::InternalServerError("Internal server error".to_string())
}

impl From<ParseCreatePublicationHttpRequestError> for ApiError {
    fn from(err: ParseCreatePublicationHttpRequestError) -> Self {
        Self::UnprocessableEntity(err.to_string())
    }
}

impl From<PublicationIdError> for ApiError {
    fn from(err: PublicationIdError) -> Self {
        Self::UnprocessableEntity(err.to_string())
    }
}

impl From<EditorialStatusError> for ApiError {
    fn from(err: EditorialStatusError) -> Self {
        Self::UnprocessableEntity(err.to_string())
    }
}

impl From<CreatePublicationError> for ApiError {
    fn from(err: CreatePublicationError) -> Self {
        match err {
            CreatePublicationError::UnknownAuthor { .. } => {
                Self::UnprocessableEntity(err.to_string())
            }
            CreatePublicationError::AuthorCheck(cause) => {
                tracing::error!("{cause:?}");
                Self::BadGateway("Authors service unavailable".to_string())
            }
            CreatePublicationError::Other(cause) => internal_server_error(&cause),
        }
    }
}

impl From<FindPublicationError> for ApiError {
    fn from(err: FindPublicationError) -> Self {
        match err {
            FindPublicationError::NotFound { .. } => Self::NotFound(err.to_string()),
            FindPublicationError::Other(cause) => internal_server_error(&cause),
        }
    }
}

impl From<FindAllPublicationsError> for ApiError {
    fn from(err: FindAllPublicationsError) -> Self {
        internal_server_error(&err.0)
    }
}

impl From<ChangeStatusError> for ApiError {
    fn from(err: ChangeStatusError) -> Self {
        match err {
            ChangeStatusError::NotFound { .. } => Self::NotFound(err.to_string()),
            ChangeStatusError::Other(cause) => internal_server_error(&cause),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePublicationHttpRequest {
    title: String,
    author_id: String,
    summary: String,
    content: String,
    #[serde(rename = "tipoPublicacion")]
    publication_type: String,
    category: String,
}

#[derive(Error, Debug)]
pub enum ParseCreatePublicationHttpRequestError {
    #[error(transparent)]
    Text(#[from] RequiredTextEmptyError),
    #[error(transparent)]
    AuthorId(#[from] AuthorIdError),
    #[error(transparent)]
    PublicationType(#[from] PublicationTypeError),
}

impl TryFrom<CreatePublicationHttpRequest> for CreatePublicationRequest {
    type Error = ParseCreatePublicationHttpRequestError;

    fn try_from(value: CreatePublicationHttpRequest) -> Result<Self, Self::Error> {
        let title = RequiredText::new("title", &value.title)?;
        let author_id = value.author_id.parse()?;
        let summary = RequiredText::new("summary", &value.summary)?;
        let content = RequiredText::new("content", &value.content)?;
        let publication_type = value.publication_type.parse()?;
        let category = RequiredText::new("category", &value.category)?;
        Ok(Self::new(
            title,
            author_id,
            summary,
            content,
            publication_type,
            category,
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationHttpResponse {
    id: String,
    title: String,
    author_id: String,
    summary: String,
    content: String,
    #[serde(rename = "tipoPublicacion")]
    publication_type: &'static str,
    category: String,
    status: &'static str,
    published_at: Option<DateTime<Utc>>,
}

impl From<Publication> for PublicationHttpResponse {
    fn from(value: Publication) -> Self {
        Self {
            id: value.id().to_string(),
            title: value.title().to_string(),
            author_id: value.author_id().to_string(),
            summary: value.summary().to_string(),
            content: value.content().to_string(),
            publication_type: value.publication_type().as_str(),
            category: value.category().to_string(),
            status: value.status().as_str(),
            published_at: value.published_at(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChangeStatusHttpQuery {
    status: String,
}

pub async fn create_publication<PR: PublicationRepository, AC: AuthorClient>(
    State(state): State<AppState<PR, AC>>,
    Json(body): Json<CreatePublicationHttpRequest>,
) -> Result<ApiSuccess<PublicationHttpResponse>, ApiError> {
    let req = body.try_into()?;
    state
        .publication_service
        .create_publication(&req)
        .await
        .map_err(ApiError::from)
        .map(|publication| ApiSuccess::new(StatusCode::CREATED, publication.into()))
}

pub async fn list_publications<PR: PublicationRepository, AC: AuthorClient>(
    State(state): State<AppState<PR, AC>>,
) -> Result<ApiSuccess<Vec<PublicationHttpResponse>>, ApiError> {
    state
        .publication_service
        .find_all_publications()
        .await
        .map_err(ApiError::from)
        .map(|publications| {
            let body: Vec<PublicationHttpResponse> =
                publications.into_iter().map(Into::into).collect();
            ApiSuccess::new(StatusCode::OK, body)
        })
}

pub async fn find_publication<PR: PublicationRepository, AC: AuthorClient>(
    State(state): State<AppState<PR, AC>>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<PublicationHttpResponse>, ApiError> {
    let req = FindPublicationRequest::new(id.parse()?);
    state
        .publication_service
        .find_publication(&req)
        .await
        .map_err(ApiError::from)
        .map(|publication| ApiSuccess::new(StatusCode::OK, publication.into()))
}

pub async fn change_status<PR: PublicationRepository, AC: AuthorClient>(
    State(state): State<AppState<PR, AC>>,
    Path(id): Path<String>,
    Query(query): Query<ChangeStatusHttpQuery>,
) -> Result<ApiSuccess<PublicationHttpResponse>, ApiError> {
    let req = ChangeStatusRequest::new(id.parse()?, query.status.parse()?);
    state
        .publication_service
        .change_status(&req)
        .await
        .map_err(ApiError::from)
        .map(|publication| ApiSuccess::new(StatusCode::OK, publication.into()))
}
