//! Authentication error types.

use thiserror::Error;

use couplet_core::EmailError;

use crate::db::RepositoryError;

/// Errors that can occur during admin authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The login challenge answer did not match. Raised before any
    /// credential or database access.
    #[error("challenge answer did not match")]
    InvalidChallenge,

    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The account authenticated but has no admin row. The caller must
    /// revoke the session - authentication alone does not make an admin.
    #[error("account is not an admin")]
    NotAnAdmin,

    /// Password does not meet the minimum requirements.
    #[error("password must be at least {min} characters")]
    WeakPassword {
        /// Minimum required length.
        min: usize,
    },

    /// Email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// An account already exists with this email.
    #[error("account already exists")]
    AccountExists,

    /// Password hashing or verification failed unexpectedly.
    #[error("password hashing error")]
    PasswordHash,

    /// Underlying repository failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
