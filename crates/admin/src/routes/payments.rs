//! Payments route handler: history listing and date-range figures.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::instrument;

use couplet_core::MemberId;

use crate::db::PaymentRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, ensure_privilege};
use crate::models::Payment;
use crate::state::AppState;

use super::dashboard::AdminView;

/// Privilege guarding the payments page.
const VIEW_PAYMENTS: &str = "view_payments";

/// Maximum rows shown.
const LIST_LIMIT: i64 = 200;

/// Payment row view for templates.
#[derive(Debug, Clone)]
pub struct PaymentView {
    pub username: String,
    pub email: String,
    pub amount: String,
    pub status: String,
    pub membership: String,
    pub method: String,
    pub paid_at: String,
}

impl From<&Payment> for PaymentView {
    fn from(payment: &Payment) -> Self {
        Self {
            username: payment.username.clone(),
            email: payment.member_email.clone(),
            amount: format!("{} {:.2}", payment.currency, payment.amount),
            status: payment.status.to_string(),
            membership: payment.membership_type.to_string(),
            method: payment
                .payment_method
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            paid_at: payment.payment_date.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Payments page template.
#[derive(Template)]
#[template(path = "payments/index.html")]
struct PaymentsIndexTemplate {
    admin: AdminView,
    current_path: String,
    member_id: String,
    from: String,
    to: String,
    count: String,
    revenue: String,
    failed: String,
    payments: Vec<PaymentView>,
}

/// Build the payments router.
pub fn router() -> Router<AppState> {
    Router::new().route("/payments", get(index))
}

/// Filter parameters for the payments page.
#[derive(Debug, Default, Deserialize)]
struct PaymentsQuery {
    #[serde(default)]
    member_id: String,
    #[serde(default)]
    from: String,
    #[serde(default)]
    to: String,
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn start_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

fn end_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(23, 59, 59).map(|dt| dt.and_utc())
}

/// Payments page.
///
/// GET /payments
#[instrument(skip(admin, state))]
async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<PaymentsQuery>,
) -> Result<Html<String>, AppError> {
    ensure_privilege(&admin, VIEW_PAYMENTS)?;

    let member_filter: Option<MemberId> = {
        let trimmed = query.member_id.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(
                trimmed
                    .parse()
                    .map_err(|_| AppError::BadRequest("invalid member id".to_owned()))?,
            )
        }
    };

    let from = parse_date(&query.from).and_then(start_of_day);
    let to = parse_date(&query.to).and_then(end_of_day);

    let repo = PaymentRepository::new(state.pool());
    let payments = repo.search(member_filter, LIST_LIMIT).await?;
    let stats = repo.stats(from, to).await?;

    let template = PaymentsIndexTemplate {
        admin: AdminView::from(&admin),
        current_path: "/payments".to_string(),
        member_id: query.member_id,
        from: query.from,
        to: query.to,
        count: stats.count.to_string(),
        revenue: format!("${:.2}", stats.completed_total),
        failed: stats.failed_count.to_string(),
        payments: payments.iter().map(PaymentView::from).collect(),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}
