use crate::model::{
    ChangeStatusError, ChangeStatusRequest, CreatePublicationError, EditorialStatus,
    FindAllPublicationsError, FindPublicationError, FindPublicationRequest, Publication,
    RequiredText,
};
use crate::store::PublicationRepository;
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteRow};
use sqlx::{FromRow, Row, SqlitePool};
use std::str::FromStr;

const PUBLICATION_COLUMNS: &str = "id, title, author_id, summary, content, publication_type, \
                                   category, status, published_at";

static MIGRATOR: Migrator = sqlx::migrate!();

#[derive(Debug, Clone)]
pub struct Sqlite {
    pool: SqlitePool,
}

impl Sqlite {
    pub async fn new(path: &str) -> anyhow::Result<Self> {
        let opts = SqliteConnectOptions::from_str(path)
            .with_context(|| format!("Invalid database path {path}"))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePool::connect_with(opts)
            .await
            .with_context(|| format!("Failed to open database at {path}"))?;

        MIGRATOR.run(&pool).await?;

        Ok(Self { pool })
    }
}

impl<'r> FromRow<'r, SqliteRow> for Publication {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: &str = row.try_get("id")?;
        let title: &str = row.try_get("title")?;
        let author_id: &str = row.try_get("author_id")?;
        let summary: &str = row.try_get("summary")?;
        let content: &str = row.try_get("content")?;
        let publication_type: &str = row.try_get("publication_type")?;
        let category: &str = row.try_get("category")?;
        let status: &str = row.try_get("status")?;
        let published_at = row.try_get("published_at")?;

        Ok(Self::new(
            id.parse().map_err(decode_error)?,
            RequiredText::new_unchecked(title),
            author_id.parse().map_err(decode_error)?,
            RequiredText::new_unchecked(summary),
            RequiredText::new_unchecked(content),
            publication_type.parse().map_err(decode_error)?,
            RequiredText::new_unchecked(category),
            status.parse().map_err(decode_error)?,
            published_at,
        ))
    }
}

#[async_trait]
impl PublicationRepository for Sqlite {
    async fn create_publication(
        &self,
        publication: &Publication,
    ) -> Result<Publication, CreatePublicationError> {
        let query = format!(
            "INSERT INTO publication ({PUBLICATION_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {PUBLICATION_COLUMNS}"
        );
        let created = sqlx::query_as(&query)
            .bind(publication.id().to_string())
            .bind(publication.title().to_string())
            .bind(publication.author_id().to_string())
            .bind(publication.summary().to_string())
            .bind(publication.content().to_string())
            .bind(publication.publication_type().as_str())
            .bind(publication.category().to_string())
            .bind(publication.status().as_str())
            .bind(publication.published_at())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                let err = anyhow!(err).context(format!(
                    r#"Failed to create publication with title "{}""#,
                    publication.title()
                ));
                CreatePublicationError::Other(err)
            })?;

        Ok(created)
    }

    async fn find_publication(
        &self,
        req: &FindPublicationRequest,
    ) -> Result<Publication, FindPublicationError> {
        let query = format!("SELECT {PUBLICATION_COLUMNS} FROM publication WHERE id = ?");
        let publication = sqlx::query_as(&query)
            .bind(req.id().to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                if matches!(err, sqlx::Error::RowNotFound) {
                    FindPublicationError::NotFound { id: req.id() }
                } else {
                    let err = anyhow!(err).context(format!(
                        r#"Failed to retrieve publication with id "{}""#,
                        req.id()
                    ));
                    FindPublicationError::Other(err)
                }
            })?;

        Ok(publication)
    }

    async fn find_all_publications(&self) -> Result<Vec<Publication>, FindAllPublicationsError> {
        let query = format!("SELECT {PUBLICATION_COLUMNS} FROM publication ORDER BY rowid");
        let publications = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| {
                let err = anyhow!(err).context("Failed to retrieve all publications");
                FindAllPublicationsError(err)
            })?;

        Ok(publications)
    }

    async fn change_status(
        &self,
        req: &ChangeStatusRequest,
    ) -> Result<Publication, ChangeStatusError> {
        let query = format!(
            "UPDATE publication SET status = ?, \
             published_at = CASE WHEN ? AND published_at IS NULL THEN ? ELSE published_at END \
             WHERE id = ? RETURNING {PUBLICATION_COLUMNS}"
        );
        let publication = sqlx::query_as(&query)
            .bind(req.status().as_str())
            .bind(req.status() == EditorialStatus::Published)
            .bind(Utc::now())
            .bind(req.id().to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                if matches!(err, sqlx::Error::RowNotFound) {
                    ChangeStatusError::NotFound { id: req.id() }
                } else {
                    let err = anyhow!(err).context(format!(
                        r#"Failed to change status of publication with id "{}""#,
                        req.id()
                    ));
                    ChangeStatusError::Other(err)
                }
            })?;

        Ok(publication)
    }
}

fn decode_error<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}
