//! Payment repository: history search and date-range aggregates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use couplet_core::MemberId;

use super::RepositoryError;
use crate::models::payment::{Payment, PaymentStats};

/// Repository for payment database operations.
pub struct PaymentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PaymentRepository<'a> {
    /// Create a new payment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search payments, optionally scoped to one member, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(
        &self,
        member_id: Option<MemberId>,
        limit: i64,
    ) -> Result<Vec<Payment>, RepositoryError> {
        let payments = sqlx::query_as::<_, Payment>(
            r"
            SELECT p.id, p.member_id, m.username, m.email AS member_email,
                   p.amount, p.currency, p.status, p.payment_date,
                   p.payment_method, p.transaction_id, p.membership_type
            FROM payment p
            JOIN member m ON m.id = p.member_id
            WHERE ($1::uuid IS NULL OR p.member_id = $1)
            ORDER BY p.payment_date DESC
            LIMIT $2
            ",
        )
        .bind(member_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(payments)
    }

    /// Aggregate payment figures for an optional date range.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stats(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<PaymentStats, RepositoryError> {
        let (count, completed_total, failed_count): (i64, Option<Decimal>, i64) =
            sqlx::query_as(
                r"
                SELECT COUNT(*),
                       SUM(amount) FILTER (WHERE status = 'completed'),
                       COUNT(*) FILTER (WHERE status = 'failed')
                FROM payment
                WHERE ($1::timestamptz IS NULL OR payment_date >= $1)
                  AND ($2::timestamptz IS NULL OR payment_date <= $2)
                ",
            )
            .bind(from)
            .bind(to)
            .fetch_one(self.pool)
            .await?;

        Ok(PaymentStats {
            count,
            completed_total: completed_total.unwrap_or_default(),
            failed_count,
        })
    }
}
