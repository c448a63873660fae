//! Admin identity and authorization domain types.
//!
//! Authorization is decided by [`Authority`]: a full admin bypasses privilege
//! checks entirely, a scoped admin only holds what was explicitly granted.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use couplet_core::{AdminId, AdminRole, Email, PrivilegeCategory, PrivilegeId};

/// A named permission from the privilege catalog.
#[derive(Debug, Clone)]
pub struct Privilege {
    /// Catalog row ID.
    pub id: PrivilegeId,
    /// Unique privilege name (e.g. `manage_users`).
    pub name: String,
    /// Human-readable description.
    pub description: Option<String>,
    /// Category grouping for display.
    pub category: PrivilegeCategory,
}

/// A privilege granted to a specific admin.
///
/// Grants are keyed by `(admin_id, privilege_id)`; granting twice is a no-op
/// and revoking removes exactly that pair.
#[derive(Debug, Clone)]
pub struct PrivilegeGrant {
    /// The granted privilege.
    pub privilege: Privilege,
    /// When the grant was created.
    pub granted_at: DateTime<Utc>,
    /// Admin who created the grant (None if granted via CLI).
    pub granted_by: Option<AdminId>,
}

/// What an admin is allowed to do.
///
/// Modeled as a tagged union rather than role-string comparisons so that
/// [`Authority::permits`] is the single, exhaustive authorization decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authority {
    /// Authorized for every action, including privilege names that do not
    /// exist in the catalog. A bypass, not an additive grant.
    Full,
    /// Authorized only for the named privileges.
    Scoped(HashSet<String>),
}

impl Authority {
    /// Build an authority from a role and the granted privilege names.
    ///
    /// For a full admin the grant set is irrelevant.
    #[must_use]
    pub fn from_role(role: AdminRole, granted: impl IntoIterator<Item = String>) -> Self {
        match role {
            AdminRole::FullAdmin => Self::Full,
            AdminRole::CustomAdmin => Self::Scoped(granted.into_iter().collect()),
        }
    }

    /// Whether this authority permits the named action.
    #[must_use]
    pub fn permits(&self, action: &str) -> bool {
        match self {
            Self::Full => true,
            Self::Scoped(granted) => granted.contains(action),
        }
    }

    /// The role this authority maps onto in storage.
    #[must_use]
    pub const fn role(&self) -> AdminRole {
        match self {
            Self::Full => AdminRole::FullAdmin,
            Self::Scoped(_) => AdminRole::CustomAdmin,
        }
    }
}

/// A fully resolved admin identity: account row plus its current grant set.
#[derive(Debug, Clone)]
pub struct AdminProfile {
    /// Admin's account ID.
    pub id: AdminId,
    /// Admin's email address.
    pub email: Email,
    /// What this admin may do.
    pub authority: Authority,
    /// Grant rows backing a scoped authority (empty for full admins).
    pub grants: Vec<PrivilegeGrant>,
    /// When the admin row was created.
    pub created_at: DateTime<Utc>,
    /// Most recent successful login.
    pub last_login: Option<DateTime<Utc>>,
}

impl AdminProfile {
    /// Whether this admin may perform the named action.
    #[must_use]
    pub fn permits(&self, action: &str) -> bool {
        self.authority.permits(action)
    }

    /// Whether a specific privilege ID is currently granted.
    #[must_use]
    pub fn holds(&self, privilege_id: PrivilegeId) -> bool {
        self.grants.iter().any(|g| g.privilege.id == privilege_id)
    }
}

/// Authorization check over a possibly-absent admin.
///
/// An absent identity is never authorized, for any action.
#[must_use]
pub fn has_privilege(profile: Option<&AdminProfile>, action: &str) -> bool {
    profile.is_some_and(|p| p.permits(action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn full_profile() -> AdminProfile {
        AdminProfile {
            id: AdminId::new(Uuid::nil()),
            email: Email::parse("root@couplet.app").expect("valid email"),
            authority: Authority::Full,
            grants: vec![],
            created_at: Utc::now(),
            last_login: None,
        }
    }

    fn scoped_profile(names: &[&str]) -> AdminProfile {
        AdminProfile {
            id: AdminId::new(Uuid::nil()),
            email: Email::parse("ops@couplet.app").expect("valid email"),
            authority: Authority::Scoped(names.iter().map(ToString::to_string).collect()),
            grants: vec![],
            created_at: Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn test_full_authority_permits_everything() {
        let profile = full_profile();
        assert!(profile.permits("delete_users"));
        assert!(profile.permits("view_payments"));
        // Even names that do not exist in the catalog.
        assert!(profile.permits("no_such_privilege"));
        assert!(profile.permits(""));
    }

    #[test]
    fn test_scoped_authority_permits_only_granted() {
        let profile = scoped_profile(&["view_payments"]);
        assert!(profile.permits("view_payments"));
        assert!(!profile.permits("delete_users"));
        assert!(!profile.permits("no_such_privilege"));
    }

    #[test]
    fn test_empty_scope_permits_nothing() {
        let profile = scoped_profile(&[]);
        assert!(!profile.permits("manage_users"));
    }

    #[test]
    fn test_absent_identity_is_never_authorized() {
        assert!(!has_privilege(None, "view_payments"));
        assert!(!has_privilege(None, ""));
    }

    #[test]
    fn test_present_identity_delegates_to_authority() {
        let full = full_profile();
        let scoped = scoped_profile(&["view_payments"]);
        assert!(has_privilege(Some(&full), "delete_users"));
        assert!(!has_privilege(Some(&scoped), "delete_users"));
        assert!(has_privilege(Some(&scoped), "view_payments"));
    }

    #[test]
    fn test_authority_from_role() {
        let full = Authority::from_role(AdminRole::FullAdmin, vec!["ignored".to_owned()]);
        assert_eq!(full, Authority::Full);
        assert_eq!(full.role(), AdminRole::FullAdmin);

        let scoped = Authority::from_role(AdminRole::CustomAdmin, vec!["a".to_owned()]);
        assert!(scoped.permits("a"));
        assert!(!scoped.permits("b"));
        assert_eq!(scoped.role(), AdminRole::CustomAdmin);
    }
}
