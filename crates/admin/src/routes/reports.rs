//! Reporting route handler.

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use tracing::instrument;

use crate::db::ReportsRepository;
use crate::db::reports::LabelledCount;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, ensure_privilege};
use crate::state::AppState;

use super::dashboard::AdminView;

/// Privilege guarding the reporting page.
const VIEW_REPORTS: &str = "view_reports";

/// A labelled figure for the distribution tables.
#[derive(Debug, Clone)]
pub struct CountView {
    pub label: String,
    pub count: String,
}

impl From<&LabelledCount> for CountView {
    fn from(row: &LabelledCount) -> Self {
        Self {
            label: row.label.clone(),
            count: row.count.to_string(),
        }
    }
}

/// Reports page template.
#[derive(Template)]
#[template(path = "reports/index.html")]
struct ReportsIndexTemplate {
    admin: AdminView,
    current_path: String,
    total_members: String,
    active_members: String,
    paying_members: String,
    total_revenue: String,
    match_count: String,
    membership_distribution: Vec<CountView>,
    top_countries: Vec<CountView>,
}

/// Build the reports router.
pub fn router() -> Router<AppState> {
    Router::new().route("/reports", get(index))
}

/// Reporting and analytics page.
///
/// GET /reports
#[instrument(skip(admin, state))]
async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    ensure_privilege(&admin, VIEW_REPORTS)?;

    let report = ReportsRepository::new(state.pool()).platform_report().await?;

    let template = ReportsIndexTemplate {
        admin: AdminView::from(&admin),
        current_path: "/reports".to_string(),
        total_members: report.total_members.to_string(),
        active_members: report.active_members.to_string(),
        paying_members: report.paying_members.to_string(),
        total_revenue: format!("${:.2}", report.total_revenue),
        match_count: report.match_count.to_string(),
        membership_distribution: report
            .membership_distribution
            .iter()
            .map(CountView::from)
            .collect(),
        top_countries: report.top_countries.iter().map(CountView::from).collect(),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}
