//! Lookup-table and ban-list repositories.
//!
//! Table names come exclusively from [`LookupKind`], a closed enum, so the
//! `format!` calls below never see user input.

use sqlx::PgPool;

use couplet_core::{AdminId, BanId, LookupId};

use super::RepositoryError;
use crate::models::lookup::{BannedCountry, BannedIp, LookupEntry, LookupKind};

/// Repository over the closed set of lookup tables.
pub struct LookupRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LookupRepository<'a> {
    /// Create a new lookup repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all entries of a lookup table, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, kind: LookupKind) -> Result<Vec<LookupEntry>, RepositoryError> {
        let sql = format!(
            r"
            SELECT id, name, description, display_order, is_active, created_at
            FROM {}
            ORDER BY created_at DESC
            ",
            kind.table()
        );

        let entries = sqlx::query_as::<_, LookupEntry>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(entries)
    }

    /// Insert a new entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        kind: LookupKind,
        name: &str,
    ) -> Result<LookupEntry, RepositoryError> {
        let sql = format!(
            r"
            INSERT INTO {} (name)
            VALUES ($1)
            RETURNING id, name, description, display_order, is_active, created_at
            ",
            kind.table()
        );

        let entry = sqlx::query_as::<_, LookupEntry>(&sql)
            .bind(name)
            .fetch_one(self.pool)
            .await?;

        Ok(entry)
    }

    /// Rename an entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the entry doesn't exist.
    pub async fn update_name(
        &self,
        kind: LookupKind,
        id: LookupId,
        name: &str,
    ) -> Result<(), RepositoryError> {
        let sql = format!("UPDATE {} SET name = $1 WHERE id = $2", kind.table());

        let result = sqlx::query(&sql)
            .bind(name)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete an entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the entry doesn't exist.
    pub async fn delete(&self, kind: LookupKind, id: LookupId) -> Result<(), RepositoryError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", kind.table());

        let result = sqlx::query(&sql).bind(id).execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Repository for the country and IP ban lists.
pub struct BanRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BanRepository<'a> {
    /// Create a new ban repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List banned countries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_countries(&self) -> Result<Vec<BannedCountry>, RepositoryError> {
        let bans = sqlx::query_as::<_, BannedCountry>(
            r"
            SELECT id, country_code, country_name, reason, is_active, created_by, created_at
            FROM banned_country
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(bans)
    }

    /// Ban a country.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn ban_country(
        &self,
        country_code: &str,
        country_name: &str,
        created_by: AdminId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO banned_country (country_code, country_name, created_by)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(country_code)
        .bind(country_name)
        .bind(created_by)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// List banned IPs, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_ips(&self) -> Result<Vec<BannedIp>, RepositoryError> {
        let bans = sqlx::query_as::<_, BannedIp>(
            r"
            SELECT id, ip_address, reason, is_active, expires_at, created_by, created_at
            FROM banned_ip
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(bans)
    }

    /// Ban an IP address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn ban_ip(
        &self,
        ip_address: &str,
        created_by: AdminId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO banned_ip (ip_address, created_by)
            VALUES ($1, $2)
            ",
        )
        .bind(ip_address)
        .bind(created_by)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Remove a country ban.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the ban doesn't exist.
    pub async fn unban_country(&self, id: BanId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM banned_country WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove an IP ban.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the ban doesn't exist.
    pub async fn unban_ip(&self, id: BanId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM banned_ip WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
