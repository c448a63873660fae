//! Admin user repository: admin rows, the privilege catalog, and grants.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use couplet_core::{AdminId, AdminRole, Email, PrivilegeCategory, PrivilegeId};

use super::RepositoryError;
use crate::models::admin::{AdminProfile, Authority, Privilege, PrivilegeGrant};

/// Row type for `admin.admin_user` queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminUserRow {
    id: AdminId,
    email: Email,
    role: AdminRole,
    created_at: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

/// Row type for grant queries (grant joined with its catalog entry).
#[derive(Debug, Clone, sqlx::FromRow)]
struct GrantRow {
    admin_id: AdminId,
    privilege_id: PrivilegeId,
    name: String,
    description: Option<String>,
    category: PrivilegeCategory,
    granted_at: DateTime<Utc>,
    granted_by: Option<AdminId>,
}

impl From<GrantRow> for PrivilegeGrant {
    fn from(row: GrantRow) -> Self {
        Self {
            privilege: Privilege {
                id: row.privilege_id,
                name: row.name,
                description: row.description,
                category: row.category,
            },
            granted_at: row.granted_at,
            granted_by: row.granted_by,
        }
    }
}

fn build_profile(row: AdminUserRow, grants: Vec<PrivilegeGrant>) -> AdminProfile {
    let authority = Authority::from_role(
        row.role,
        grants.iter().map(|g| g.privilege.name.clone()),
    );
    AdminProfile {
        id: row.id,
        email: row.email,
        authority,
        grants,
        created_at: row.created_at,
        last_login: row.last_login,
    }
}

/// Repository for admin user and privilege operations.
pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Resolve the full profile (authority + grants) for an account ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account has no admin row -
    /// callers must treat this as "not an admin" and revoke the session.
    pub async fn resolve_profile(&self, id: AdminId) -> Result<AdminProfile, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(
            r"
            SELECT id, email, role, created_at, last_login
            FROM admin.admin_user
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let grants = self.grants_for(id).await?;
        Ok(build_profile(row, grants))
    }

    /// List every admin with their grant sets, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_all(&self) -> Result<Vec<AdminProfile>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdminUserRow>(
            r"
            SELECT id, email, role, created_at, last_login
            FROM admin.admin_user
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let grant_rows = sqlx::query_as::<_, GrantRow>(
            r"
            SELECT g.admin_id, g.privilege_id, p.name, p.description, p.category,
                   g.granted_at, g.granted_by
            FROM admin.privilege_grant g
            JOIN admin.privilege p ON p.id = g.privilege_id
            ORDER BY p.category, p.name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let profiles = rows
            .into_iter()
            .map(|row| {
                let grants = grant_rows
                    .iter()
                    .filter(|g| g.admin_id == row.id)
                    .cloned()
                    .map(PrivilegeGrant::from)
                    .collect();
                build_profile(row, grants)
            })
            .collect();

        Ok(profiles)
    }

    /// The full privilege catalog, grouped by category then name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_privileges(&self) -> Result<Vec<Privilege>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct PrivilegeRow {
            id: PrivilegeId,
            name: String,
            description: Option<String>,
            category: PrivilegeCategory,
        }

        let rows = sqlx::query_as::<_, PrivilegeRow>(
            r"
            SELECT id, name, description, category
            FROM admin.privilege
            ORDER BY category, name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Privilege {
                id: r.id,
                name: r.name,
                description: r.description,
                category: r.category,
            })
            .collect())
    }

    /// Resolve a profile by email (CLI convenience).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no admin has this email.
    pub async fn resolve_by_email(&self, email: &Email) -> Result<AdminProfile, RepositoryError> {
        let id: AdminId =
            sqlx::query_scalar("SELECT id FROM admin.admin_user WHERE email = $1")
                .bind(email)
                .fetch_optional(self.pool)
                .await?
                .ok_or(RepositoryError::NotFound)?;

        self.resolve_profile(id).await
    }

    /// Look up a catalog privilege by its unique name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the name is not in the catalog.
    pub async fn find_privilege(&self, name: &str) -> Result<Privilege, RepositoryError> {
        let privileges = self.list_privileges().await?;
        privileges
            .into_iter()
            .find(|p| p.name == name)
            .ok_or(RepositoryError::NotFound)
    }

    /// Create an admin row for an existing account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the account is already an admin.
    pub async fn create(
        &self,
        id: AdminId,
        email: &Email,
        role: AdminRole,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO admin.admin_user (id, email, role)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(id)
        .bind(email)
        .bind(role)
        .execute(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "admin already exists"))?;

        Ok(())
    }

    /// Grant a privilege to an admin. Idempotent: granting an
    /// already-granted pair is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn grant(
        &self,
        admin_id: AdminId,
        privilege_id: PrivilegeId,
        granted_by: Option<AdminId>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO admin.privilege_grant (admin_id, privilege_id, granted_by)
            VALUES ($1, $2, $3)
            ON CONFLICT (admin_id, privilege_id) DO NOTHING
            ",
        )
        .bind(admin_id)
        .bind(privilege_id)
        .bind(granted_by)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Revoke a privilege from an admin. Idempotent: revoking an absent
    /// pair is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn revoke(
        &self,
        admin_id: AdminId,
        privilege_id: PrivilegeId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM admin.privilege_grant
            WHERE admin_id = $1 AND privilege_id = $2
            ",
        )
        .bind(admin_id)
        .bind(privilege_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Stamp the admin's last successful login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn touch_last_login(&self, id: AdminId) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE admin.admin_user SET last_login = now() WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Whether no admin exists yet (gates the one-time bootstrap flow).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn is_empty(&self) -> Result<bool, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin.admin_user")
            .fetch_one(self.pool)
            .await?;

        Ok(count == 0)
    }

    async fn grants_for(&self, id: AdminId) -> Result<Vec<PrivilegeGrant>, RepositoryError> {
        let rows = sqlx::query_as::<_, GrantRow>(
            r"
            SELECT g.admin_id, g.privilege_id, p.name, p.description, p.category,
                   g.granted_at, g.granted_by
            FROM admin.privilege_grant g
            JOIN admin.privilege p ON p.id = g.privilege_id
            WHERE g.admin_id = $1
            ORDER BY p.category, p.name
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(PrivilegeGrant::from).collect())
    }
}
