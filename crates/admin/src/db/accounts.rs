//! Account repository: password credentials for the identity layer.
//!
//! Accounts are deliberately separate from admin rows. Verifying a password
//! only proves who the caller is; whether they are an admin is decided by
//! [`super::AdminRepository::resolve_profile`].

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use couplet_core::{AdminId, Email};

use super::RepositoryError;

/// A credential row from `admin.account`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    /// Account ID (shared with the admin row, when one exists).
    pub id: AdminId,
    /// Login email.
    pub email: Email,
    /// Argon2 password hash (PHC string).
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Repository for account credential operations.
pub struct AccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up an account by login email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError> {
        let account = sqlx::query_as::<_, Account>(
            r"
            SELECT id, email, password_hash, created_at
            FROM admin.account
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    /// Create an account with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already taken.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<Account, RepositoryError> {
        sqlx::query_as::<_, Account>(
            r"
            INSERT INTO admin.account (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            ",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "account email already exists"))
    }

    /// Delete an account (cascades to the admin row and its grants).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such account exists.
    pub async fn delete(&self, id: AdminId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM admin.account WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
