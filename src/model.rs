use chrono::{DateTime, Utc};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Identifier of an author owned by the authors service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthorId(Uuid);

impl AuthorId {
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for AuthorId {
    type Err = AuthorIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| AuthorIdError(raw.into()))
    }
}

impl std::fmt::Display for AuthorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[derive(Error, Debug)]
#[error("\"{0}\" is not a valid author id")]
pub struct AuthorIdError(String);

/// Failure of an existence check that could not be resolved to a yes or no.
#[derive(Error, Debug)]
pub enum AuthorExistsError {
    #[error("Authors service answered {status} for author \"{id}\"")]
    UnexpectedStatus { id: AuthorId, status: u16 },
    #[error(transparent)]
    Other(anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicationId(Uuid);

impl PublicationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl FromStr for PublicationId {
    type Err = PublicationIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| PublicationIdError(raw.into()))
    }
}

impl std::fmt::Display for PublicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[derive(Error, Debug)]
#[error("\"{0}\" is not a valid publication id")]
pub struct PublicationIdError(String);

/// Free text that must not be blank, such as a title or a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredText(String);

impl RequiredText {
    pub fn new(field: &'static str, raw: &str) -> Result<Self, RequiredTextEmptyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(RequiredTextEmptyError { field })
        } else {
            Ok(Self(trimmed.into()))
        }
    }

    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for RequiredText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
#[error("Field \"{field}\" cannot be empty")]
pub struct RequiredTextEmptyError {
    field: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationType {
    Article,
    Book,
    Research,
    Report,
    Other,
}

impl PublicationType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "ARTICULO",
            Self::Book => "LIBRO",
            Self::Research => "INVESTIGACION",
            Self::Report => "INFORME",
            Self::Other => "OTRO",
        }
    }
}

impl FromStr for PublicationType {
    type Err = PublicationTypeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "ARTICULO" => Ok(Self::Article),
            "LIBRO" => Ok(Self::Book),
            "INVESTIGACION" => Ok(Self::Research),
            "INFORME" => Ok(Self::Report),
            "OTRO" => Ok(Self::Other),
            _ => Err(PublicationTypeError(raw.into())),
        }
    }
}

impl std::fmt::Display for PublicationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("\"{0}\" is not a valid publication type")]
pub struct PublicationTypeError(String);

/// Editorial workflow state. New publications start as drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorialStatus {
    Draft,
    InReview,
    Approved,
    Published,
    Rejected,
}

impl EditorialStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::InReview => "IN_REVIEW",
            Self::Approved => "APPROVED",
            Self::Published => "PUBLISHED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl FromStr for EditorialStatus {
    type Err = EditorialStatusError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "DRAFT" => Ok(Self::Draft),
            "IN_REVIEW" => Ok(Self::InReview),
            "APPROVED" => Ok(Self::Approved),
            "PUBLISHED" => Ok(Self::Published),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(EditorialStatusError(raw.into())),
        }
    }
}

impl std::fmt::Display for EditorialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("\"{0}\" is not a valid editorial status")]
pub struct EditorialStatusError(String);

#[derive(Debug, Clone)]
pub struct Publication {
    id: PublicationId,
    title: RequiredText,
    author_id: AuthorId,
    summary: RequiredText,
    content: RequiredText,
    publication_type: PublicationType,
    category: RequiredText,
    status: EditorialStatus,
    published_at: Option<DateTime<Utc>>,
}

impl Publication {
    /// A freshly submitted publication: a draft that has never been published.
    pub fn draft(id: PublicationId, req: &CreatePublicationRequest) -> Self {
        Self {
            id,
            title: req.title.clone(),
            author_id: req.author_id,
            summary: req.summary.clone(),
            content: req.content.clone(),
            publication_type: req.publication_type,
            category: req.category.clone(),
            status: EditorialStatus::Draft,
            published_at: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        id: PublicationId,
        title: RequiredText,
        author_id: AuthorId,
        summary: RequiredText,
        content: RequiredText,
        publication_type: PublicationType,
        category: RequiredText,
        status: EditorialStatus,
        published_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            title,
            author_id,
            summary,
            content,
            publication_type,
            category,
            status,
            published_at,
        }
    }

    pub const fn id(&self) -> PublicationId {
        self.id
    }

    pub const fn title(&self) -> &RequiredText {
        &self.title
    }

    pub const fn author_id(&self) -> AuthorId {
        self.author_id
    }

    pub const fn summary(&self) -> &RequiredText {
        &self.summary
    }

    pub const fn content(&self) -> &RequiredText {
        &self.content
    }

    pub const fn publication_type(&self) -> PublicationType {
        self.publication_type
    }

    pub const fn category(&self) -> &RequiredText {
        &self.category
    }

    pub const fn status(&self) -> EditorialStatus {
        self.status
    }

    pub const fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }
}

#[derive(Debug)]
pub struct CreatePublicationRequest {
    title: RequiredText,
    author_id: AuthorId,
    summary: RequiredText,
    content: RequiredText,
    publication_type: PublicationType,
    category: RequiredText,
}

impl CreatePublicationRequest {
    pub const fn new(
        title: RequiredText,
        author_id: AuthorId,
        summary: RequiredText,
        content: RequiredText,
        publication_type: PublicationType,
        category: RequiredText,
    ) -> Self {
        Self {
            title,
            author_id,
            summary,
            content,
            publication_type,
            category,
        }
    }

    pub const fn author_id(&self) -> AuthorId {
        self.author_id
    }
}

#[derive(Error, Debug)]
pub enum CreatePublicationError {
    #[error("Author with id \"{id}\" does not exist")]
    UnknownAuthor { id: AuthorId },
    #[error(transparent)]
    AuthorCheck(#[from] AuthorExistsError),
    #[error(transparent)]
    Other(anyhow::Error),
}

#[derive(Debug)]
pub struct FindPublicationRequest {
    id: PublicationId,
}

impl FindPublicationRequest {
    pub const fn new(id: PublicationId) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> PublicationId {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum FindPublicationError {
    #[error("Publication with id \"{id}\" does not exist")]
    NotFound { id: PublicationId },
    #[error(transparent)]
    Other(anyhow::Error),
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct FindAllPublicationsError(#[from] pub anyhow::Error);

#[derive(Debug)]
pub struct ChangeStatusRequest {
    id: PublicationId,
    status: EditorialStatus,
}

impl ChangeStatusRequest {
    pub const fn new(id: PublicationId, status: EditorialStatus) -> Self {
        Self { id, status }
    }

    pub const fn id(&self) -> PublicationId {
        self.id
    }

    pub const fn status(&self) -> EditorialStatus {
        self.status
    }
}

#[derive(Error, Debug)]
pub enum ChangeStatusError {
    #[error("Publication with id \"{id}\" does not exist")]
    NotFound { id: PublicationId },
    #[error(transparent)]
    Other(anyhow::Error),
}
