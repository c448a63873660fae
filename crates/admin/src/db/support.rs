//! Support ticket repository: ticket queue, status changes, responses.

use sqlx::PgPool;

use couplet_core::{AdminId, TicketId, TicketStatus};

use super::RepositoryError;
use crate::models::support::{SupportTicket, TicketResponse};

const SELECT_TICKET: &str = r"
    SELECT t.id, t.member_id, m.username, t.subject, t.description,
           t.status, t.priority, t.created_at, t.updated_at
    FROM support_ticket t
    LEFT JOIN member m ON m.id = t.member_id
";

/// Repository for support ticket database operations.
pub struct SupportRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SupportRepository<'a> {
    /// Create a new support repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List tickets, optionally filtered by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        status: Option<TicketStatus>,
    ) -> Result<Vec<SupportTicket>, RepositoryError> {
        let sql = format!(
            r"
            {SELECT_TICKET}
            WHERE ($1::ticket_status IS NULL OR t.status = $1)
            ORDER BY t.created_at DESC
            "
        );

        let tickets = sqlx::query_as::<_, SupportTicket>(&sql)
            .bind(status)
            .fetch_all(self.pool)
            .await?;

        Ok(tickets)
    }

    /// Get a single ticket.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: TicketId) -> Result<Option<SupportTicket>, RepositoryError> {
        let sql = format!("{SELECT_TICKET} WHERE t.id = $1");

        let ticket = sqlx::query_as::<_, SupportTicket>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(ticket)
    }

    /// Responses on a ticket, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn responses(&self, id: TicketId) -> Result<Vec<TicketResponse>, RepositoryError> {
        let responses = sqlx::query_as::<_, TicketResponse>(
            r"
            SELECT id, ticket_id, admin_id, message, created_at
            FROM ticket_response
            WHERE ticket_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(responses)
    }

    /// Number of tickets currently in a given status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_status(&self, status: TicketStatus) -> Result<i64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM support_ticket WHERE status = $1")
                .bind(status)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }

    /// Move a ticket to a new status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the ticket doesn't exist.
    pub async fn update_status(
        &self,
        id: TicketId,
        status: TicketStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE support_ticket
            SET status = $1, updated_at = now()
            WHERE id = $2
            ",
        )
        .bind(status)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Append an admin response to a ticket thread.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add_response(
        &self,
        id: TicketId,
        admin_id: AdminId,
        message: &str,
    ) -> Result<TicketResponse, RepositoryError> {
        let response = sqlx::query_as::<_, TicketResponse>(
            r"
            INSERT INTO ticket_response (ticket_id, admin_id, message)
            VALUES ($1, $2, $3)
            RETURNING id, ticket_id, admin_id, message, created_at
            ",
        )
        .bind(id)
        .bind(admin_id)
        .bind(message)
        .fetch_one(self.pool)
        .await?;

        // Keep the ticket's updated_at in step with its thread.
        sqlx::query("UPDATE support_ticket SET updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(response)
    }
}
