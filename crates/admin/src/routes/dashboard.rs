//! Dashboard route handler.

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use tracing::instrument;

use couplet_core::TicketStatus;

use crate::db::{ReportsRepository, SupportRepository};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{AdminProfile, Authority};
use crate::state::AppState;

/// Admin identity view for templates.
#[derive(Debug, Clone)]
pub struct AdminView {
    pub email: String,
    pub role: String,
    pub is_full_admin: bool,
}

impl From<&AdminProfile> for AdminView {
    fn from(admin: &AdminProfile) -> Self {
        Self {
            email: admin.email.to_string(),
            role: admin.authority.role().to_string().replace('_', " "),
            is_full_admin: admin.authority == Authority::Full,
        }
    }
}

/// Dashboard metric tiles.
#[derive(Debug, Clone)]
pub struct DashboardMetrics {
    pub members: String,
    pub active_members: String,
    pub open_tickets: String,
    pub revenue: String,
}

impl Default for DashboardMetrics {
    fn default() -> Self {
        Self {
            members: "0".to_string(),
            active_members: "0".to_string(),
            open_tickets: "0".to_string(),
            revenue: "$0.00".to_string(),
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin: AdminView,
    pub current_path: String,
    pub metrics: DashboardMetrics,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

/// Dashboard page handler.
#[instrument(skip(admin, state))]
async fn dashboard(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Html<String> {
    let reports = ReportsRepository::new(state.pool());
    let support = SupportRepository::new(state.pool());

    let metrics = match reports.platform_report().await {
        Ok(report) => {
            let open_tickets = support
                .count_by_status(TicketStatus::Open)
                .await
                .unwrap_or_else(|e| {
                    tracing::error!("Failed to count open tickets: {e}");
                    0
                });
            DashboardMetrics {
                members: report.total_members.to_string(),
                active_members: report.active_members.to_string(),
                open_tickets: open_tickets.to_string(),
                revenue: format!("${:.2}", report.total_revenue),
            }
        }
        Err(e) => {
            tracing::error!("Failed to build dashboard metrics: {e}");
            DashboardMetrics::default()
        }
    };

    let template = DashboardTemplate {
        admin: AdminView::from(&admin),
        current_path: "/".to_string(),
        metrics,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}
