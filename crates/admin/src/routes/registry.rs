//! Marriage registry route handlers.

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use couplet_core::{RegistryId, RegistryStatus};

use crate::db::RegistryRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, ensure_privilege};
use crate::models::{RegistryEntry, RegistryUpdate};
use crate::state::AppState;

use super::dashboard::AdminView;

/// Privilege guarding the registry page.
const MANAGE_REGISTRY: &str = "manage_registry";

/// The statuses offered by the filter/edit dropdowns.
const STATUS_OPTIONS: [RegistryStatus; 4] = [
    RegistryStatus::Pending,
    RegistryStatus::Confirmed,
    RegistryStatus::Completed,
    RegistryStatus::Cancelled,
];

/// Registry row view for templates.
#[derive(Debug, Clone)]
pub struct RegistryView {
    pub id: String,
    pub couple: String,
    pub marriage_date: String,
    pub location: String,
    pub status: String,
    pub gift_sent: bool,
    pub notes: String,
}

impl From<&RegistryEntry> for RegistryView {
    fn from(entry: &RegistryEntry) -> Self {
        let name = |username: &Option<String>| {
            username.clone().unwrap_or_else(|| "(deleted)".to_string())
        };
        Self {
            id: entry.id.to_string(),
            couple: format!(
                "{} & {}",
                name(&entry.member1_username),
                name(&entry.member2_username)
            ),
            marriage_date: entry.marriage_date.format("%Y-%m-%d").to_string(),
            location: entry.location.clone(),
            status: entry.status.to_string(),
            gift_sent: entry.gift_sent,
            notes: entry.admin_notes.clone().unwrap_or_default(),
        }
    }
}

/// Registry page template.
#[derive(Template)]
#[template(path = "registry/index.html")]
struct RegistryIndexTemplate {
    admin: AdminView,
    current_path: String,
    status_filter: String,
    statuses: Vec<String>,
    entries: Vec<RegistryView>,
}

/// Build the registry router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/registry", get(index))
        .route("/registry/{id}/update", post(update))
}

/// Status filter query.
#[derive(Debug, Default, Deserialize)]
struct RegistryQuery {
    #[serde(default)]
    status: String,
}

/// Registry tracker page.
///
/// GET /registry
#[instrument(skip(admin, state))]
async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<RegistryQuery>,
) -> Result<Html<String>, AppError> {
    ensure_privilege(&admin, MANAGE_REGISTRY)?;

    let status_filter = query.status.trim().to_owned();
    let status = if status_filter.is_empty() {
        None
    } else {
        Some(
            status_filter
                .parse::<RegistryStatus>()
                .map_err(AppError::BadRequest)?,
        )
    };

    let entries = RegistryRepository::new(state.pool())
        .list(status)
        .await?
        .iter()
        .map(RegistryView::from)
        .collect();

    let template = RegistryIndexTemplate {
        admin: AdminView::from(&admin),
        current_path: "/registry".to_string(),
        status_filter,
        statuses: STATUS_OPTIONS.iter().map(ToString::to_string).collect(),
        entries,
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Registry edit form fields.
#[derive(Debug, Deserialize)]
struct UpdateForm {
    status: String,
    /// Checkbox: absent when unchecked.
    gift_sent: Option<String>,
    #[serde(default)]
    admin_notes: String,
}

/// Update an entry's status, gift flag and notes.
///
/// POST /registry/{id}/update
#[instrument(skip(admin, state, form))]
async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RegistryId>,
    axum::Form(form): axum::Form<UpdateForm>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, MANAGE_REGISTRY)?;

    let status: RegistryStatus = form.status.parse().map_err(AppError::BadRequest)?;
    let notes = form.admin_notes.trim();

    let update = RegistryUpdate {
        status,
        gift_sent: form.gift_sent.is_some(),
        admin_notes: (!notes.is_empty()).then(|| notes.to_owned()),
    };

    RegistryRepository::new(state.pool()).update(id, &update).await?;

    tracing::info!(registry_id = %id, admin_id = %admin.id, %status, "registry entry updated");

    Ok(Redirect::to("/registry").into_response())
}
