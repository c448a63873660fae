//! Admin privilege management route handlers (full admin only).

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use couplet_core::{AdminId, PrivilegeId};

use crate::db::AdminRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireFullAdmin;
use crate::models::{AdminProfile, Authority};
use crate::state::AppState;

use super::dashboard::AdminView;

/// Admin row view for the privileges page.
#[derive(Debug, Clone)]
pub struct AdminListItem {
    pub id: String,
    pub email: String,
    pub role: String,
    pub is_full_admin: bool,
    pub privilege_names: String,
    pub last_login: String,
    pub selected: bool,
}

fn list_item(profile: &AdminProfile, selected: Option<AdminId>) -> AdminListItem {
    let names: Vec<&str> = profile
        .grants
        .iter()
        .map(|g| g.privilege.name.as_str())
        .collect();
    AdminListItem {
        id: profile.id.to_string(),
        email: profile.email.to_string(),
        role: profile.authority.role().to_string().replace('_', " "),
        is_full_admin: profile.authority == Authority::Full,
        privilege_names: if names.is_empty() {
            "-".to_string()
        } else {
            names.join(", ")
        },
        last_login: profile
            .last_login
            .map_or_else(|| "never".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
        selected: selected == Some(profile.id),
    }
}

/// One privilege checkbox row in the grant editor.
#[derive(Debug, Clone)]
pub struct PrivilegeRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub granted: bool,
}

/// Privileges page template.
#[derive(Template)]
#[template(path = "privileges/index.html")]
struct PrivilegesIndexTemplate {
    admin: AdminView,
    current_path: String,
    admins: Vec<AdminListItem>,
    /// Grant editor for the selected admin, when one is selected and scoped.
    editor: Option<EditorView>,
}

/// Grant editor view for one selected admin.
#[derive(Debug, Clone)]
pub struct EditorView {
    pub admin_id: String,
    pub email: String,
    pub is_full_admin: bool,
    pub privileges: Vec<PrivilegeRow>,
}

/// Build the privileges router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/privileges", get(index))
        .route("/privileges/{id}/grant", post(grant))
        .route("/privileges/{id}/revoke", post(revoke))
}

/// Selection query parameter.
#[derive(Debug, Default, Deserialize)]
struct PrivilegesQuery {
    admin: Option<AdminId>,
}

/// Privileges page: all admins, plus the grant editor for a selected one.
///
/// GET /privileges
#[instrument(skip(current, state))]
async fn index(
    RequireFullAdmin(current): RequireFullAdmin,
    State(state): State<AppState>,
    Query(query): Query<PrivilegesQuery>,
) -> Result<Html<String>, AppError> {
    let repo = AdminRepository::new(state.pool());
    let profiles = repo.list_all().await?;
    let catalog = repo.list_privileges().await?;

    let editor = query.admin.and_then(|selected_id| {
        profiles
            .iter()
            .find(|p| p.id == selected_id)
            .map(|profile| EditorView {
                admin_id: profile.id.to_string(),
                email: profile.email.to_string(),
                is_full_admin: profile.authority == Authority::Full,
                privileges: catalog
                    .iter()
                    .map(|p| PrivilegeRow {
                        id: p.id.to_string(),
                        name: p.name.clone(),
                        description: p.description.clone().unwrap_or_default(),
                        category: p.category.to_string(),
                        granted: profile.holds(p.id),
                    })
                    .collect(),
            })
    });

    let admins = profiles
        .iter()
        .map(|p| list_item(p, query.admin))
        .collect();

    let template = PrivilegesIndexTemplate {
        admin: AdminView::from(&current),
        current_path: "/privileges".to_string(),
        admins,
        editor,
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Grant/revoke form fields.
#[derive(Debug, Deserialize)]
struct GrantForm {
    privilege_id: PrivilegeId,
}

/// Grant a privilege to an admin. Idempotent.
///
/// POST /privileges/{id}/grant
#[instrument(skip(current, state, form))]
async fn grant(
    RequireFullAdmin(current): RequireFullAdmin,
    State(state): State<AppState>,
    Path(admin_id): Path<AdminId>,
    axum::Form(form): axum::Form<GrantForm>,
) -> Result<Response, AppError> {
    AdminRepository::new(state.pool())
        .grant(admin_id, form.privilege_id, Some(current.id))
        .await?;

    tracing::info!(
        admin_id = %admin_id,
        privilege_id = %form.privilege_id,
        granted_by = %current.id,
        "privilege granted"
    );

    Ok(Redirect::to(&format!("/privileges?admin={admin_id}")).into_response())
}

/// Revoke a privilege from an admin. Idempotent.
///
/// POST /privileges/{id}/revoke
#[instrument(skip(current, state, form))]
async fn revoke(
    RequireFullAdmin(current): RequireFullAdmin,
    State(state): State<AppState>,
    Path(admin_id): Path<AdminId>,
    axum::Form(form): axum::Form<GrantForm>,
) -> Result<Response, AppError> {
    AdminRepository::new(state.pool())
        .revoke(admin_id, form.privilege_id)
        .await?;

    tracing::info!(
        admin_id = %admin_id,
        privilege_id = %form.privilege_id,
        revoked_by = %current.id,
        "privilege revoked"
    );

    Ok(Redirect::to(&format!("/privileges?admin={admin_id}")).into_response())
}
