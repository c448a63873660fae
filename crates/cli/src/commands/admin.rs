//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new admin user
//! couplet-cli admin create -e root@couplet.app -p 'a long password' -r full_admin
//!
//! # Grant or revoke a privilege
//! couplet-cli admin grant -e ops@couplet.app -n view_payments
//! couplet-cli admin revoke -e ops@couplet.app -n view_payments
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string

use sqlx::PgPool;
use thiserror::Error;

use couplet_admin::db::{AdminRepository, RepositoryError};
use couplet_admin::models::Authority;
use couplet_admin::services::{AdminAuthService, AuthError};
use couplet_core::{AdminRole, Email};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: full_admin, custom_admin")]
    InvalidRole(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// No admin with the given email.
    #[error("No admin found with email: {0}")]
    AdminNotFound(String),

    /// No privilege with the given name.
    #[error("No privilege named: {0}")]
    PrivilegeNotFound(String),

    /// Authentication service failure (weak password, duplicate account, ...).
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Repository failure.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

async fn connect() -> Result<PgPool, AdminError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .map_err(|_| AdminError::MissingEnvVar("ADMIN_DATABASE_URL"))?;

    tracing::info!("Connecting to admin database...");
    Ok(PgPool::connect(&database_url).await?)
}

/// Create a new admin user with a password.
///
/// # Errors
///
/// Returns `AdminError` if the role is invalid, the password is too weak,
/// or an account already exists with this email.
pub async fn create_user(email: &str, password: &str, role: &str) -> Result<(), AdminError> {
    let role: AdminRole = role
        .parse()
        .map_err(|_| AdminError::InvalidRole(role.to_owned()))?;

    let pool = connect().await?;

    tracing::info!("Creating admin user: {} ({})", email, role);

    let auth = AdminAuthService::new(&pool);
    let profile = auth.create_admin(email, password, role).await?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Email: {}, Role: {}",
        profile.id,
        profile.email,
        profile.authority.role()
    );
    if profile.authority != Authority::Full {
        tracing::info!("Grant privileges with: couplet-cli admin grant -e {} -n <privilege>", email);
    }

    Ok(())
}

/// Grant a privilege to an admin by email and privilege name.
///
/// Granting an already-granted privilege is a no-op.
///
/// # Errors
///
/// Returns `AdminError` if the admin or privilege does not exist.
pub async fn grant(email: &str, privilege_name: &str) -> Result<(), AdminError> {
    let pool = connect().await?;
    let repo = AdminRepository::new(&pool);

    let (profile, privilege) = find_pair(&repo, email, privilege_name).await?;

    repo.grant(profile.id, privilege.id, None).await?;

    tracing::info!("Granted {} to {}", privilege.name, profile.email);
    Ok(())
}

/// Revoke a privilege from an admin by email and privilege name.
///
/// Revoking an absent privilege is a no-op.
///
/// # Errors
///
/// Returns `AdminError` if the admin or privilege does not exist.
pub async fn revoke(email: &str, privilege_name: &str) -> Result<(), AdminError> {
    let pool = connect().await?;
    let repo = AdminRepository::new(&pool);

    let (profile, privilege) = find_pair(&repo, email, privilege_name).await?;

    repo.revoke(profile.id, privilege.id).await?;

    tracing::info!("Revoked {} from {}", privilege.name, profile.email);
    Ok(())
}

/// List all admins with their roles and grants.
///
/// # Errors
///
/// Returns `AdminError` if the query fails.
pub async fn list() -> Result<(), AdminError> {
    let pool = connect().await?;
    let repo = AdminRepository::new(&pool);

    for profile in repo.list_all().await? {
        let grants: Vec<&str> = profile
            .grants
            .iter()
            .map(|g| g.privilege.name.as_str())
            .collect();
        tracing::info!(
            "{} role={} privileges=[{}]",
            profile.email,
            profile.authority.role(),
            grants.join(", ")
        );
    }

    Ok(())
}

async fn find_pair<'a>(
    repo: &AdminRepository<'a>,
    email: &str,
    privilege_name: &str,
) -> Result<
    (
        couplet_admin::models::AdminProfile,
        couplet_admin::models::Privilege,
    ),
    AdminError,
> {
    let email_parsed =
        Email::parse(email).map_err(|e| AdminError::InvalidEmail(e.to_string()))?;

    let profile = repo
        .resolve_by_email(&email_parsed)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AdminError::AdminNotFound(email.to_owned()),
            other => AdminError::Repository(other),
        })?;

    let privilege = repo.find_privilege(privilege_name).await.map_err(|e| match e {
        RepositoryError::NotFound => AdminError::PrivilegeNotFound(privilege_name.to_owned()),
        other => AdminError::Repository(other),
    })?;

    Ok((profile, privilege))
}
