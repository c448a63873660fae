//! Support ticket route handlers.

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use couplet_core::{TicketId, TicketStatus};

use crate::db::SupportRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, ensure_privilege};
use crate::models::{SupportTicket, TicketResponse};
use crate::state::AppState;

use super::dashboard::AdminView;

/// Privilege guarding the support pages.
const MANAGE_SUPPORT: &str = "manage_support";

/// The statuses offered by the filter dropdown, in workflow order.
const STATUS_OPTIONS: [TicketStatus; 4] = [
    TicketStatus::Open,
    TicketStatus::InProgress,
    TicketStatus::Resolved,
    TicketStatus::Closed,
];

/// Ticket row view for templates.
#[derive(Debug, Clone)]
pub struct TicketView {
    pub id: String,
    pub username: String,
    pub subject: String,
    pub status: String,
    pub priority: String,
    pub created_at: String,
}

impl From<&SupportTicket> for TicketView {
    fn from(ticket: &SupportTicket) -> Self {
        Self {
            id: ticket.id.to_string(),
            username: ticket
                .username
                .clone()
                .unwrap_or_else(|| "(deleted)".to_string()),
            subject: ticket.subject.clone(),
            status: ticket.status.to_string(),
            priority: ticket.priority.to_string(),
            created_at: ticket.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Response view for the detail page.
#[derive(Debug, Clone)]
pub struct ResponseView {
    pub message: String,
    pub created_at: String,
}

impl From<&TicketResponse> for ResponseView {
    fn from(response: &TicketResponse) -> Self {
        Self {
            message: response.message.clone(),
            created_at: response.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Support queue template.
#[derive(Template)]
#[template(path = "support/index.html")]
struct SupportIndexTemplate {
    admin: AdminView,
    current_path: String,
    status_filter: String,
    statuses: Vec<String>,
    tickets: Vec<TicketView>,
}

/// Ticket detail template.
#[derive(Template)]
#[template(path = "support/detail.html")]
struct SupportDetailTemplate {
    admin: AdminView,
    current_path: String,
    ticket: TicketView,
    description: String,
    statuses: Vec<String>,
    responses: Vec<ResponseView>,
}

/// Build the support router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/support", get(index))
        .route("/support/{id}", get(detail))
        .route("/support/{id}/status", post(update_status))
        .route("/support/{id}/respond", post(respond))
}

/// Status filter query.
#[derive(Debug, Default, Deserialize)]
struct SupportQuery {
    #[serde(default)]
    status: String,
}

/// Support queue, optionally filtered by status.
///
/// GET /support
#[instrument(skip(admin, state))]
async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<SupportQuery>,
) -> Result<Html<String>, AppError> {
    ensure_privilege(&admin, MANAGE_SUPPORT)?;

    let status_filter = query.status.trim().to_owned();
    let status = if status_filter.is_empty() {
        None
    } else {
        Some(
            status_filter
                .parse::<TicketStatus>()
                .map_err(AppError::BadRequest)?,
        )
    };

    let tickets = SupportRepository::new(state.pool())
        .list(status)
        .await?
        .iter()
        .map(TicketView::from)
        .collect();

    let template = SupportIndexTemplate {
        admin: AdminView::from(&admin),
        current_path: "/support".to_string(),
        status_filter,
        statuses: STATUS_OPTIONS.iter().map(ToString::to_string).collect(),
        tickets,
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Ticket detail with its response thread.
///
/// GET /support/{id}
#[instrument(skip(admin, state))]
async fn detail(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<TicketId>,
) -> Result<Html<String>, AppError> {
    ensure_privilege(&admin, MANAGE_SUPPORT)?;

    let repo = SupportRepository::new(state.pool());
    let ticket = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("ticket {id}")))?;
    let responses = repo.responses(id).await?;

    let template = SupportDetailTemplate {
        admin: AdminView::from(&admin),
        current_path: "/support".to_string(),
        description: ticket.description.clone(),
        ticket: TicketView::from(&ticket),
        statuses: STATUS_OPTIONS.iter().map(ToString::to_string).collect(),
        responses: responses.iter().map(ResponseView::from).collect(),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Status change form.
#[derive(Debug, Deserialize)]
struct StatusForm {
    status: String,
}

/// Move a ticket to a new status.
///
/// POST /support/{id}/status
#[instrument(skip(admin, state, form))]
async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<TicketId>,
    axum::Form(form): axum::Form<StatusForm>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, MANAGE_SUPPORT)?;

    let status: TicketStatus = form.status.parse().map_err(AppError::BadRequest)?;

    SupportRepository::new(state.pool())
        .update_status(id, status)
        .await?;

    tracing::info!(ticket_id = %id, admin_id = %admin.id, %status, "ticket status updated");

    Ok(Redirect::to(&format!("/support/{id}")).into_response())
}

/// Response form.
#[derive(Debug, Deserialize)]
struct RespondForm {
    message: String,
}

/// Append a response to the ticket thread.
///
/// POST /support/{id}/respond
#[instrument(skip(admin, state, form))]
async fn respond(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<TicketId>,
    axum::Form(form): axum::Form<RespondForm>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, MANAGE_SUPPORT)?;

    let message = form.message.trim();
    if message.is_empty() {
        return Ok(Redirect::to(&format!("/support/{id}")).into_response());
    }

    SupportRepository::new(state.pool())
        .add_response(id, admin.id, message)
        .await?;

    Ok(Redirect::to(&format!("/support/{id}")).into_response())
}
