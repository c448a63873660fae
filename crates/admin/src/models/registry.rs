//! Marriage registry domain types.

use chrono::{DateTime, NaiveDate, Utc};

use couplet_core::{MemberId, RegistryId, RegistryStatus};

/// A marriage registry entry joined with both members' usernames.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RegistryEntry {
    /// Unique entry ID.
    pub id: RegistryId,
    /// First spouse (None if the account was deleted).
    pub member1_id: Option<MemberId>,
    /// First spouse's username.
    pub member1_username: Option<String>,
    /// Second spouse (None if the account was deleted).
    pub member2_id: Option<MemberId>,
    /// Second spouse's username.
    pub member2_username: Option<String>,
    /// Date of the marriage.
    pub marriage_date: NaiveDate,
    /// Where the marriage took place.
    pub location: String,
    /// Tracking status.
    pub status: RegistryStatus,
    /// Whether the congratulatory gift was sent.
    pub gift_sent: bool,
    /// Free-form admin notes.
    pub admin_notes: Option<String>,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

/// Field updates applied from the registry edit form.
#[derive(Debug, Clone)]
pub struct RegistryUpdate {
    pub status: RegistryStatus,
    pub gift_sent: bool,
    pub admin_notes: Option<String>,
}
