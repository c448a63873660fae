//! Broadcast message domain types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use couplet_core::{AdminId, MessageId, MessageTarget};

/// A broadcast message sent by an admin.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GlobalMessage {
    /// Unique message ID.
    pub id: MessageId,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub content: String,
    /// Audience selector.
    pub target_type: MessageTarget,
    /// Explicit recipient IDs (None for `all`).
    pub target_ids: Option<Vec<Uuid>>,
    /// Admin who sent the message.
    pub sent_by: AdminId,
    /// When the message was sent.
    pub sent_at: DateTime<Utc>,
}
