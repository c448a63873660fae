//! Platform member domain type.

use chrono::{DateTime, NaiveDate, Utc};

use couplet_core::{Email, MemberId, MembershipType};

/// A platform member as seen by the dashboard.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Member {
    /// Unique member ID.
    pub id: MemberId,
    /// Public username.
    pub username: String,
    /// Member's email address.
    pub email: Email,
    /// Phone number, if provided.
    pub phone: Option<String>,
    /// Free-form location string.
    pub location: Option<String>,
    /// City, if provided.
    pub city: Option<String>,
    /// Country, if provided.
    pub country: Option<String>,
    /// Self-reported gender.
    pub gender: Option<String>,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Profile bio.
    pub bio: Option<String>,
    /// Membership tier.
    pub membership_type: MembershipType,
    /// Whether the account is active (moderation flag).
    pub is_active: bool,
    /// Whether the profile passed verification.
    pub is_verified: bool,
    /// When the member signed up.
    pub created_at: DateTime<Utc>,
    /// Most recent login.
    pub last_login: Option<DateTime<Utc>>,
}

/// Field updates applied from the member edit form.
#[derive(Debug, Clone)]
pub struct MemberUpdate {
    pub username: String,
    pub email: Email,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub is_active: bool,
}
