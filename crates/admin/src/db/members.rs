//! Member repository: search, moderation edits, deletion.

use sqlx::PgPool;

use couplet_core::MemberId;

use super::RepositoryError;
use crate::models::member::{Member, MemberUpdate};

/// Optional substring filters for member search.
///
/// Empty strings from the search form are treated as "no filter".
#[derive(Debug, Clone, Default)]
pub struct MemberFilters {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

impl MemberFilters {
    /// Whether any filter is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.location.is_none()
    }
}

const SELECT_MEMBER: &str = r"
    SELECT id, username, email, phone, location, city, country, gender,
           date_of_birth, bio, membership_type, is_active, is_verified,
           created_at, last_login
    FROM member
";

/// Repository for member database operations.
pub struct MemberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MemberRepository<'a> {
    /// Create a new member repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search members with optional substring filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(
        &self,
        filters: &MemberFilters,
        limit: i64,
    ) -> Result<Vec<Member>, RepositoryError> {
        let sql = format!(
            r"
            {SELECT_MEMBER}
            WHERE ($1::text IS NULL OR username ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR email ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR phone ILIKE '%' || $3 || '%')
              AND ($4::text IS NULL OR location ILIKE '%' || $4 || '%')
            ORDER BY created_at DESC
            LIMIT $5
            "
        );

        let members = sqlx::query_as::<_, Member>(&sql)
            .bind(filters.username.as_deref())
            .bind(filters.email.as_deref())
            .bind(filters.phone.as_deref())
            .bind(filters.location.as_deref())
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        Ok(members)
    }

    /// Search by username only (used by the test-matching picker).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search_by_username(
        &self,
        username: &str,
        limit: i64,
    ) -> Result<Vec<Member>, RepositoryError> {
        let sql = format!(
            r"
            {SELECT_MEMBER}
            WHERE username ILIKE '%' || $1 || '%'
            ORDER BY username ASC
            LIMIT $2
            "
        );

        let members = sqlx::query_as::<_, Member>(&sql)
            .bind(username)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        Ok(members)
    }

    /// Get a member by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: MemberId) -> Result<Option<Member>, RepositoryError> {
        let sql = format!("{SELECT_MEMBER} WHERE id = $1");

        let member = sqlx::query_as::<_, Member>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(member)
    }

    /// Apply moderation edits from the member edit form.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the member doesn't exist.
    /// Returns `RepositoryError::Conflict` if username or email is taken.
    pub async fn update(
        &self,
        id: MemberId,
        update: &MemberUpdate,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE member
            SET username = $1, email = $2, phone = $3, location = $4,
                is_active = $5, updated_at = now()
            WHERE id = $6
            ",
        )
        .bind(&update.username)
        .bind(&update.email)
        .bind(update.phone.as_deref())
        .bind(update.location.as_deref())
        .bind(update.is_active)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "username or email already in use"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a member (cascades to payments, matches, recipients).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the member doesn't exist.
    pub async fn delete(&self, id: MemberId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM member WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
