//! Test-match repository.

use sqlx::PgPool;

use couplet_core::{AdminId, MemberId};

use super::RepositoryError;
use crate::models::matching::TestMatch;

/// Repository for manual test-match operations.
pub struct MatchRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MatchRepository<'a> {
    /// Create a new match repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Recent test matches, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<TestMatch>, RepositoryError> {
        let matches = sqlx::query_as::<_, TestMatch>(
            r"
            SELECT t.id,
                   t.member1_id, m1.username AS member1_username,
                   t.member2_id, m2.username AS member2_username,
                   t.created_by, t.notes, t.created_at
            FROM test_match t
            JOIN member m1 ON m1.id = t.member1_id
            JOIN member m2 ON m2.id = t.member2_id
            ORDER BY t.created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(matches)
    }

    /// Create a test match between two members.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the pair is already matched.
    pub async fn create(
        &self,
        member1: MemberId,
        member2: MemberId,
        created_by: AdminId,
        notes: Option<&str>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO test_match (member1_id, member2_id, created_by, notes)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(member1)
        .bind(member2)
        .bind(created_by)
        .bind(notes)
        .execute(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "these members are already matched"))?;

        Ok(())
    }
}
