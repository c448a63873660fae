//! Session-related types for admin authentication.

use serde::{Deserialize, Serialize};

use couplet_core::{AdminId, Email};

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the logged-in admin; the
/// full profile (authority, grants) is re-resolved from the database on each
/// protected request so revocations take effect immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's account ID.
    pub id: AdminId,
    /// Admin's email address.
    pub email: Email,
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for the expected answer to the login challenge.
    pub const LOGIN_CHALLENGE: &str = "login_challenge";
}
