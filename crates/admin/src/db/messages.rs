//! Broadcast message repository.

use sqlx::PgPool;
use uuid::Uuid;

use couplet_core::{AdminId, MemberId, MessageId, MessageTarget};

use super::RepositoryError;
use crate::models::message::GlobalMessage;

/// Repository for broadcast message database operations.
pub struct MessageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new message repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List sent messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, limit: i64) -> Result<Vec<GlobalMessage>, RepositoryError> {
        let messages = sqlx::query_as::<_, GlobalMessage>(
            r"
            SELECT id, subject, content, target_type, target_ids, sent_by, sent_at
            FROM global_message
            ORDER BY sent_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(messages)
    }

    /// Send a broadcast: insert the message, then fan out recipient rows.
    ///
    /// For [`MessageTarget::All`] the recipient set is every member; otherwise
    /// it is the supplied target list. The two inserts are sequential, not
    /// transactional - a failure between them is surfaced to the caller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either insert fails.
    pub async fn send(
        &self,
        subject: &str,
        content: &str,
        target: MessageTarget,
        target_ids: &[MemberId],
        sent_by: AdminId,
    ) -> Result<GlobalMessage, RepositoryError> {
        let stored_targets: Option<Vec<Uuid>> = match target {
            MessageTarget::All => None,
            MessageTarget::User | MessageTarget::Group => {
                Some(target_ids.iter().map(|id| id.as_uuid()).collect())
            }
        };

        let message = sqlx::query_as::<_, GlobalMessage>(
            r"
            INSERT INTO global_message (subject, content, target_type, target_ids, sent_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, subject, content, target_type, target_ids, sent_by, sent_at
            ",
        )
        .bind(subject)
        .bind(content)
        .bind(target)
        .bind(stored_targets.as_deref())
        .bind(sent_by)
        .fetch_one(self.pool)
        .await?;

        match target {
            MessageTarget::All => {
                sqlx::query(
                    r"
                    INSERT INTO message_recipient (message_id, member_id)
                    SELECT $1, id FROM member
                    ",
                )
                .bind(message.id)
                .execute(self.pool)
                .await?;
            }
            MessageTarget::User | MessageTarget::Group => {
                sqlx::query(
                    r"
                    INSERT INTO message_recipient (message_id, member_id)
                    SELECT $1, unnest($2::uuid[])
                    ON CONFLICT DO NOTHING
                    ",
                )
                .bind(message.id)
                .bind(
                    target_ids
                        .iter()
                        .map(|id| id.as_uuid())
                        .collect::<Vec<_>>(),
                )
                .execute(self.pool)
                .await?;
            }
        }

        Ok(message)
    }

    /// Number of recipients a message was fanned out to.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recipient_count(&self, id: MessageId) -> Result<i64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM message_recipient WHERE message_id = $1")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }
}
