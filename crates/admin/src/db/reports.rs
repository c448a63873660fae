//! Reporting repository: platform-wide aggregates.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::RepositoryError;

/// A count keyed by a label (membership tier, country, ...).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LabelledCount {
    pub label: String,
    pub count: i64,
}

/// Platform-wide figures for the reporting page.
#[derive(Debug, Clone, Default)]
pub struct PlatformReport {
    /// All registered members.
    pub total_members: i64,
    /// Members who logged in within the last 30 days.
    pub active_members: i64,
    /// Members on a paid tier.
    pub paying_members: i64,
    /// Sum of completed payments.
    pub total_revenue: Decimal,
    /// Organic matches recorded.
    pub match_count: i64,
    /// Member count per membership tier.
    pub membership_distribution: Vec<LabelledCount>,
    /// Five most common member countries.
    pub top_countries: Vec<LabelledCount>,
}

/// Repository for reporting aggregates.
pub struct ReportsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReportsRepository<'a> {
    /// Create a new reports repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Compute the full platform report.
    ///
    /// Runs one query per figure; each query is attempted once and any
    /// failure aborts the report.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn platform_report(&self) -> Result<PlatformReport, RepositoryError> {
        let total_members: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member")
            .fetch_one(self.pool)
            .await?;

        let active_since = Utc::now() - Duration::days(30);
        let active_members: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM member WHERE last_login >= $1")
                .bind(active_since)
                .fetch_one(self.pool)
                .await?;

        let paying_members: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM member WHERE membership_type IN ('premium', 'vip')",
        )
        .fetch_one(self.pool)
        .await?;

        let total_revenue: Option<Decimal> =
            sqlx::query_scalar("SELECT SUM(amount) FROM payment WHERE status = 'completed'")
                .fetch_one(self.pool)
                .await?;

        let match_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member_match")
            .fetch_one(self.pool)
            .await?;

        let membership_distribution = sqlx::query_as::<_, LabelledCount>(
            r"
            SELECT membership_type::text AS label, COUNT(*) AS count
            FROM member
            GROUP BY membership_type
            ORDER BY count DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let top_countries = sqlx::query_as::<_, LabelledCount>(
            r"
            SELECT COALESCE(country, 'Unknown') AS label, COUNT(*) AS count
            FROM member
            GROUP BY COALESCE(country, 'Unknown')
            ORDER BY count DESC
            LIMIT 5
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(PlatformReport {
            total_members,
            active_members,
            paying_members,
            total_revenue: total_revenue.unwrap_or_default(),
            match_count,
            membership_distribution,
            top_countries,
        })
    }
}
