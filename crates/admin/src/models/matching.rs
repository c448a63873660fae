//! Manual test-match domain types.

use chrono::{DateTime, Utc};

use couplet_core::{AdminId, MatchId, MemberId};

/// A manually created match between two members, joined with usernames.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TestMatch {
    /// Unique match ID.
    pub id: MatchId,
    /// First member.
    pub member1_id: MemberId,
    /// First member's username.
    pub member1_username: String,
    /// Second member.
    pub member2_id: MemberId,
    /// Second member's username.
    pub member2_username: String,
    /// Admin who created the match.
    pub created_by: AdminId,
    /// Optional notes.
    pub notes: Option<String>,
    /// When the match was created.
    pub created_at: DateTime<Utc>,
}
