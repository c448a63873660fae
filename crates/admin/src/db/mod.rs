//! Database access for the admin dashboard.
//!
//! # Schemas
//!
//! - `admin` - dashboard-owned tables: `account`, `admin_user`, `privilege`,
//!   `privilege_grant`, `session`
//! - `public` - platform tables the dashboard reads and moderates: `member`,
//!   `payment`, `support_ticket`, `global_message`, `marriage_registry`,
//!   lookup tables, ban lists
//!
//! Every entity is accessed through its own typed repository; there is no
//! generic table-name-driven gateway. Queries use the sqlx runtime API.
//!
//! # Migrations
//!
//! Migrations live in `crates/admin/migrations/` and are run via:
//! ```bash
//! cargo run -p couplet-cli -- migrate
//! ```

pub mod accounts;
pub mod admins;
pub mod help_docs;
pub mod lookups;
pub mod matching;
pub mod members;
pub mod messages;
pub mod payments;
pub mod registry;
pub mod reports;
pub mod support;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use accounts::AccountRepository;
pub use admins::AdminRepository;
pub use help_docs::HelpDocRepository;
pub use lookups::{BanRepository, LookupRepository};
pub use matching::MatchRepository;
pub use members::{MemberFilters, MemberRepository};
pub use messages::MessageRepository;
pub use payments::PaymentRepository;
pub use registry::RegistryRepository;
pub use reports::ReportsRepository;
pub use support::SupportRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate pair).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a sqlx error, turning unique violations into [`Self::Conflict`].
    pub(crate) fn from_sqlx(err: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict_message.to_owned());
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
