//! Meta data route handlers: lookup tables and ban lists.
//!
//! One tabbed page covers the whole closed set of lookup tables plus the
//! two ban lists; mutations go through kind-scoped POST routes.

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use couplet_core::{BanId, LookupId};

use crate::db::{BanRepository, LookupRepository};
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, ensure_privilege};
use crate::models::LookupKind;
use crate::state::AppState;

use super::dashboard::AdminView;

/// Privilege guarding the metadata pages.
const MANAGE_METADATA: &str = "manage_metadata";

/// Ban list tab slugs (lookup kinds use their own slugs).
const BANNED_COUNTRIES: &str = "banned_countries";
const BANNED_IPS: &str = "banned_ips";

/// A tab in the metadata page.
#[derive(Debug, Clone)]
pub struct Tab {
    pub slug: String,
    pub label: String,
    pub active: bool,
}

/// A unified row view across lookup tables and ban lists.
#[derive(Debug, Clone)]
pub struct MetaRow {
    pub id: String,
    pub value: String,
    pub created_at: String,
    /// Ban rows can only be created and deleted, not renamed.
    pub editable: bool,
}

/// Metadata page template.
#[derive(Template)]
#[template(path = "metadata/index.html")]
struct MetadataIndexTemplate {
    admin: AdminView,
    current_path: String,
    tabs: Vec<Tab>,
    active_slug: String,
    rows: Vec<MetaRow>,
    error: Option<String>,
}

/// Build the metadata router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/metadata", get(index))
        .route("/metadata/bans/country/create", post(ban_country))
        .route("/metadata/bans/country/{id}/delete", post(unban_country))
        .route("/metadata/bans/ip/create", post(ban_ip))
        .route("/metadata/bans/ip/{id}/delete", post(unban_ip))
        .route("/metadata/{kind}/create", post(create_entry))
        .route("/metadata/{kind}/{id}/update", post(update_entry))
        .route("/metadata/{kind}/{id}/delete", post(delete_entry))
}

/// Query parameters for tab selection.
#[derive(Debug, Deserialize)]
struct TabQuery {
    table: Option<String>,
    error: Option<String>,
}

fn build_tabs(active: &str) -> Vec<Tab> {
    let mut tabs: Vec<Tab> = LookupKind::ALL
        .into_iter()
        .map(|kind| Tab {
            slug: kind.slug().to_owned(),
            label: kind.label().to_owned(),
            active: kind.slug() == active,
        })
        .collect();
    tabs.push(Tab {
        slug: BANNED_COUNTRIES.to_owned(),
        label: "Banned Countries".to_owned(),
        active: active == BANNED_COUNTRIES,
    });
    tabs.push(Tab {
        slug: BANNED_IPS.to_owned(),
        label: "Banned IPs".to_owned(),
        active: active == BANNED_IPS,
    });
    tabs
}

/// Metadata page: one tab per table.
///
/// GET /metadata
#[instrument(skip(admin, state))]
async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<TabQuery>,
) -> Result<Html<String>, AppError> {
    ensure_privilege(&admin, MANAGE_METADATA)?;

    let active = query.table.as_deref().unwrap_or("education").to_owned();

    let rows = if active == BANNED_COUNTRIES {
        BanRepository::new(state.pool())
            .list_countries()
            .await?
            .iter()
            .map(|ban| MetaRow {
                id: ban.id.to_string(),
                value: format!("{} ({})", ban.country_name, ban.country_code),
                created_at: ban.created_at.format("%Y-%m-%d").to_string(),
                editable: false,
            })
            .collect()
    } else if active == BANNED_IPS {
        BanRepository::new(state.pool())
            .list_ips()
            .await?
            .iter()
            .map(|ban| MetaRow {
                id: ban.id.to_string(),
                value: ban.ip_address.clone(),
                created_at: ban.created_at.format("%Y-%m-%d").to_string(),
                editable: false,
            })
            .collect()
    } else {
        let kind: LookupKind = active
            .parse()
            .map_err(|e: String| AppError::BadRequest(e))?;
        LookupRepository::new(state.pool())
            .list(kind)
            .await?
            .iter()
            .map(|entry| MetaRow {
                id: entry.id.to_string(),
                value: entry.name.clone(),
                created_at: entry.created_at.format("%Y-%m-%d").to_string(),
                editable: true,
            })
            .collect()
    };

    let template = MetadataIndexTemplate {
        admin: AdminView::from(&admin),
        current_path: "/metadata".to_string(),
        tabs: build_tabs(&active),
        active_slug: active,
        rows,
        error: query.error,
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Value form shared by all create/update actions.
#[derive(Debug, Deserialize)]
struct ValueForm {
    name: String,
}

fn back_to(slug: &str) -> Response {
    Redirect::to(&format!("/metadata?table={slug}")).into_response()
}

fn parse_kind(kind: &str) -> Result<LookupKind, AppError> {
    kind.parse().map_err(|e: String| AppError::BadRequest(e))
}

/// POST /metadata/{kind}/create
#[instrument(skip(admin, state, form))]
async fn create_entry(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    axum::Form(form): axum::Form<ValueForm>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, MANAGE_METADATA)?;
    let kind = parse_kind(&kind)?;

    let name = form.name.trim();
    if name.is_empty() {
        return Ok(back_to(kind.slug()));
    }

    LookupRepository::new(state.pool()).create(kind, name).await?;
    Ok(back_to(kind.slug()))
}

/// POST /metadata/{kind}/{id}/update
#[instrument(skip(admin, state, form))]
async fn update_entry(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, LookupId)>,
    axum::Form(form): axum::Form<ValueForm>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, MANAGE_METADATA)?;
    let kind = parse_kind(&kind)?;

    LookupRepository::new(state.pool())
        .update_name(kind, id, form.name.trim())
        .await?;
    Ok(back_to(kind.slug()))
}

/// POST /metadata/{kind}/{id}/delete
#[instrument(skip(admin, state))]
async fn delete_entry(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, LookupId)>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, MANAGE_METADATA)?;
    let kind = parse_kind(&kind)?;

    LookupRepository::new(state.pool()).delete(kind, id).await?;
    Ok(back_to(kind.slug()))
}

/// POST /metadata/bans/country/create
///
/// The form takes a country name; the two-letter code is derived from its
/// first characters, matching the legacy dashboard behavior.
#[instrument(skip(admin, state, form))]
async fn ban_country(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    axum::Form(form): axum::Form<ValueForm>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, MANAGE_METADATA)?;

    let name = form.name.trim();
    if name.is_empty() {
        return Ok(back_to(BANNED_COUNTRIES));
    }

    let code: String = name.chars().take(2).collect::<String>().to_uppercase();
    BanRepository::new(state.pool())
        .ban_country(&code, name, admin.id)
        .await?;
    Ok(back_to(BANNED_COUNTRIES))
}

/// POST /metadata/bans/country/{id}/delete
#[instrument(skip(admin, state))]
async fn unban_country(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<BanId>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, MANAGE_METADATA)?;

    BanRepository::new(state.pool()).unban_country(id).await?;
    Ok(back_to(BANNED_COUNTRIES))
}

/// POST /metadata/bans/ip/create
#[instrument(skip(admin, state, form))]
async fn ban_ip(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    axum::Form(form): axum::Form<ValueForm>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, MANAGE_METADATA)?;

    let address = form.name.trim();
    if address.is_empty() {
        return Ok(back_to(BANNED_IPS));
    }

    BanRepository::new(state.pool()).ban_ip(address, admin.id).await?;
    Ok(back_to(BANNED_IPS))
}

/// POST /metadata/bans/ip/{id}/delete
#[instrument(skip(admin, state))]
async fn unban_ip(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<BanId>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, MANAGE_METADATA)?;

    BanRepository::new(state.pool()).unban_ip(id).await?;
    Ok(back_to(BANNED_IPS))
}
