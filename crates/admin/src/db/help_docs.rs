//! Help document repository.

use sqlx::PgPool;

use couplet_core::{AdminId, DocumentId};

use super::RepositoryError;
use crate::models::help_doc::HelpDocument;

const SELECT_DOCUMENT: &str = r"
    SELECT id, title, content, category, version, is_published,
           created_by, created_at, updated_at
    FROM help_document
";

/// Repository for help document database operations.
pub struct HelpDocRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> HelpDocRepository<'a> {
    /// Create a new help document repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all documents, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<HelpDocument>, RepositoryError> {
        let sql = format!("{SELECT_DOCUMENT} ORDER BY updated_at DESC");

        let docs = sqlx::query_as::<_, HelpDocument>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(docs)
    }

    /// Get a single document.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: DocumentId) -> Result<Option<HelpDocument>, RepositoryError> {
        let sql = format!("{SELECT_DOCUMENT} WHERE id = $1");

        let doc = sqlx::query_as::<_, HelpDocument>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(doc)
    }

    /// Create a new (unpublished) document at version 1.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        category: &str,
        created_by: AdminId,
    ) -> Result<HelpDocument, RepositoryError> {
        let doc = sqlx::query_as::<_, HelpDocument>(
            r"
            INSERT INTO help_document (title, content, category, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, category, version, is_published,
                      created_by, created_at, updated_at
            ",
        )
        .bind(title)
        .bind(content)
        .bind(category)
        .bind(created_by)
        .fetch_one(self.pool)
        .await?;

        Ok(doc)
    }

    /// Edit a document. Every edit bumps the version counter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the document doesn't exist.
    pub async fn update(
        &self,
        id: DocumentId,
        title: &str,
        content: &str,
        category: &str,
        is_published: bool,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE help_document
            SET title = $1, content = $2, category = $3, is_published = $4,
                version = version + 1, updated_at = now()
            WHERE id = $5
            ",
        )
        .bind(title)
        .bind(content)
        .bind(category)
        .bind(is_published)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a document.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the document doesn't exist.
    pub async fn delete(&self, id: DocumentId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM help_document WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
