//! Support ticket domain types.

use chrono::{DateTime, Utc};

use couplet_core::{AdminId, MemberId, TicketId, TicketPriority, TicketResponseId, TicketStatus};

/// A support ticket joined with the reporting member's identity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SupportTicket {
    /// Unique ticket ID.
    pub id: TicketId,
    /// Member who opened the ticket (None if the account was deleted).
    pub member_id: Option<MemberId>,
    /// Member's username (joined for display).
    pub username: Option<String>,
    /// Ticket subject line.
    pub subject: String,
    /// Problem description.
    pub description: String,
    /// Workflow status.
    pub status: TicketStatus,
    /// Triage priority.
    pub priority: TicketPriority,
    /// When the ticket was opened.
    pub created_at: DateTime<Utc>,
    /// Last status change or response.
    pub updated_at: DateTime<Utc>,
}

/// An admin response on a ticket thread.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TicketResponse {
    /// Unique response ID.
    pub id: TicketResponseId,
    /// Ticket this response belongs to.
    pub ticket_id: TicketId,
    /// Responding admin.
    pub admin_id: AdminId,
    /// Response body.
    pub message: String,
    /// When the response was posted.
    pub created_at: DateTime<Utc>,
}
