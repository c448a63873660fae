//! Payment domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use couplet_core::{MemberId, MembershipType, PaymentId, PaymentStatus};

/// A payment row joined with the paying member's identity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Payment {
    /// Unique payment ID.
    pub id: PaymentId,
    /// Member who paid.
    pub member_id: MemberId,
    /// Member's username (joined for display).
    pub username: String,
    /// Member's email (joined for display).
    pub member_email: String,
    /// Charged amount.
    pub amount: Decimal,
    /// ISO currency code.
    pub currency: String,
    /// Payment status.
    pub status: PaymentStatus,
    /// When the payment was made.
    pub payment_date: DateTime<Utc>,
    /// Payment method label, if recorded.
    pub payment_method: Option<String>,
    /// External transaction reference.
    pub transaction_id: Option<String>,
    /// Membership tier this payment bought.
    pub membership_type: MembershipType,
}

/// Aggregate figures for a payment date range.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentStats {
    /// Number of payments in range.
    pub count: i64,
    /// Sum of completed payment amounts.
    pub completed_total: Decimal,
    /// Number of failed payments.
    pub failed_count: i64,
}
