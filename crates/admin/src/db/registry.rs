//! Marriage registry repository.

use sqlx::PgPool;

use couplet_core::{RegistryId, RegistryStatus};

use super::RepositoryError;
use crate::models::registry::{RegistryEntry, RegistryUpdate};

/// Repository for marriage registry database operations.
pub struct RegistryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RegistryRepository<'a> {
    /// Create a new registry repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List registry entries, optionally filtered by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        status: Option<RegistryStatus>,
    ) -> Result<Vec<RegistryEntry>, RepositoryError> {
        let entries = sqlx::query_as::<_, RegistryEntry>(
            r"
            SELECT r.id,
                   r.member1_id, m1.username AS member1_username,
                   r.member2_id, m2.username AS member2_username,
                   r.marriage_date, r.location, r.status, r.gift_sent,
                   r.admin_notes, r.created_at
            FROM marriage_registry r
            LEFT JOIN member m1 ON m1.id = r.member1_id
            LEFT JOIN member m2 ON m2.id = r.member2_id
            WHERE ($1::registry_status IS NULL OR r.status = $1)
            ORDER BY r.created_at DESC
            ",
        )
        .bind(status)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// Apply edits from the registry form (status, gift flag, notes).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the entry doesn't exist.
    pub async fn update(
        &self,
        id: RegistryId,
        update: &RegistryUpdate,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE marriage_registry
            SET status = $1, gift_sent = $2, admin_notes = $3, updated_at = now()
            WHERE id = $4
            ",
        )
        .bind(update.status)
        .bind(update.gift_sent)
        .bind(update.admin_notes.as_deref())
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
