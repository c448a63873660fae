//! Help document domain type.

use chrono::{DateTime, Utc};

use couplet_core::{AdminId, DocumentId};

/// A help/FAQ document managed by admins.
///
/// Editing a document bumps its `version`; only published documents are
/// visible to members.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HelpDocument {
    /// Unique document ID.
    pub id: DocumentId,
    /// Document title.
    pub title: String,
    /// Document body (markdown).
    pub content: String,
    /// Grouping category.
    pub category: String,
    /// Monotonically increasing edit counter.
    pub version: i32,
    /// Whether members can see this document.
    pub is_published: bool,
    /// Admin who created the document.
    pub created_by: Option<AdminId>,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
}
