//! Member search and moderation route handlers.

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use couplet_core::{Email, MemberId};

use crate::db::{MemberFilters, MemberRepository};
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, ensure_privilege};
use crate::models::{Member, MemberUpdate};
use crate::state::AppState;

use super::dashboard::AdminView;

/// Privilege guarding the member pages.
const MANAGE_USERS: &str = "manage_users";
/// Privilege guarding member deletion specifically.
const DELETE_USERS: &str = "delete_users";

/// Maximum rows returned by a search.
const SEARCH_LIMIT: i64 = 200;

/// Member row view for templates.
#[derive(Debug, Clone)]
pub struct MemberListItem {
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub membership: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<&Member> for MemberListItem {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            username: member.username.clone(),
            email: member.email.to_string(),
            phone: member.phone.clone().unwrap_or_else(|| "-".to_string()),
            location: member.location.clone().unwrap_or_else(|| "-".to_string()),
            membership: member.membership_type.to_string(),
            is_active: member.is_active,
            created_at: member.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Member search page template.
#[derive(Template)]
#[template(path = "members/index.html")]
struct MembersIndexTemplate {
    admin: AdminView,
    current_path: String,
    searched: bool,
    filters: SearchParams,
    members: Vec<MemberListItem>,
    notice: Option<String>,
}

/// Member detail/edit page template.
#[derive(Template)]
#[template(path = "members/detail.html")]
struct MemberDetailTemplate {
    admin: AdminView,
    current_path: String,
    member: MemberListItem,
    gender: String,
    country: String,
    bio: String,
    is_verified: bool,
    last_login: String,
}

/// Build the members router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/members", get(index))
        .route("/members/{id}", get(detail))
        .route("/members/{id}/update", post(update))
        .route("/members/{id}/delete", post(delete))
}

/// Search form query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    pub search: Option<String>,
    pub notice: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

impl SearchParams {
    fn to_filters(&self) -> MemberFilters {
        MemberFilters {
            username: non_empty(&self.username),
            email: non_empty(&self.email),
            phone: non_empty(&self.phone),
            location: non_empty(&self.location),
        }
    }
}

/// Member search page.
///
/// GET /members
#[instrument(skip(admin, state))]
async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, AppError> {
    ensure_privilege(&admin, MANAGE_USERS)?;

    let repo = MemberRepository::new(state.pool());

    // Results are only fetched once the form was submitted; the landing
    // page shows an empty filter form.
    let searched = params.search.is_some();
    let members = if searched {
        repo.search(&params.to_filters(), SEARCH_LIMIT)
            .await?
            .iter()
            .map(MemberListItem::from)
            .collect()
    } else {
        vec![]
    };

    let template = MembersIndexTemplate {
        admin: AdminView::from(&admin),
        current_path: "/members".to_string(),
        searched,
        notice: params.notice.clone(),
        filters: params,
        members,
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Member detail page with the edit form.
///
/// GET /members/{id}
#[instrument(skip(admin, state))]
async fn detail(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<MemberId>,
) -> Result<Html<String>, AppError> {
    ensure_privilege(&admin, MANAGE_USERS)?;

    let repo = MemberRepository::new(state.pool());
    let member = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("member {id}")))?;

    let template = MemberDetailTemplate {
        admin: AdminView::from(&admin),
        current_path: "/members".to_string(),
        gender: member.gender.clone().unwrap_or_else(|| "-".to_string()),
        country: member.country.clone().unwrap_or_else(|| "-".to_string()),
        bio: member.bio.clone().unwrap_or_default(),
        is_verified: member.is_verified,
        last_login: member
            .last_login
            .map_or_else(|| "never".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
        member: MemberListItem::from(&member),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Member edit form fields.
#[derive(Debug, Deserialize)]
struct UpdateForm {
    username: String,
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    location: String,
    /// Checkboxes are absent when unchecked.
    is_active: Option<String>,
}

/// Apply moderation edits.
///
/// POST /members/{id}/update
#[instrument(skip(admin, state, form))]
async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<MemberId>,
    axum::Form(form): axum::Form<UpdateForm>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, MANAGE_USERS)?;

    let email = Email::parse(&form.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let update = MemberUpdate {
        username: form.username.trim().to_owned(),
        email,
        phone: non_empty(&form.phone),
        location: non_empty(&form.location),
        is_active: form.is_active.is_some(),
    };

    let repo = MemberRepository::new(state.pool());
    repo.update(id, &update).await?;

    tracing::info!(member_id = %id, admin_id = %admin.id, "member updated");

    Ok(Redirect::to(&format!("/members/{id}")).into_response())
}

/// Delete a member account.
///
/// POST /members/{id}/delete
#[instrument(skip(admin, state))]
async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<MemberId>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, DELETE_USERS)?;

    let repo = MemberRepository::new(state.pool());
    repo.delete(id).await?;

    tracing::info!(member_id = %id, admin_id = %admin.id, "member deleted");

    Ok(Redirect::to("/members?notice=Member+deleted").into_response())
}
