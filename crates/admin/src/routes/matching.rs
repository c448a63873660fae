//! Manual test-matching route handlers.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use couplet_core::MemberId;

use crate::db::{MatchRepository, MemberRepository, RepositoryError};
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, ensure_privilege};
use crate::models::Member;
use crate::state::AppState;

use super::dashboard::AdminView;

/// Privilege guarding the matching page.
const MANAGE_MATCHING: &str = "manage_matching";

/// Candidate rows shown under each search box.
const PICKER_LIMIT: i64 = 10;

/// Candidate member view for the pickers.
#[derive(Debug, Clone)]
pub struct CandidateView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub gender: String,
}

impl From<&Member> for CandidateView {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            username: member.username.clone(),
            email: member.email.to_string(),
            gender: member.gender.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Recent match view.
#[derive(Debug, Clone)]
pub struct MatchView {
    pub member1: String,
    pub member2: String,
    pub created_at: String,
}

/// Matching page template.
#[derive(Template)]
#[template(path = "matching/index.html")]
struct MatchingIndexTemplate {
    admin: AdminView,
    current_path: String,
    q1: String,
    q2: String,
    candidates1: Vec<CandidateView>,
    candidates2: Vec<CandidateView>,
    recent: Vec<MatchView>,
    error: Option<String>,
    notice: Option<String>,
}

/// Build the matching router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/matching", get(index))
        .route("/matching/create", post(create))
}

/// Query parameters: one search box per side.
#[derive(Debug, Default, Deserialize)]
struct MatchingQuery {
    #[serde(default)]
    q1: String,
    #[serde(default)]
    q2: String,
    error: Option<String>,
    notice: Option<String>,
}

/// Matching page with both pickers and recent matches.
///
/// GET /matching
#[instrument(skip(admin, state))]
async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<MatchingQuery>,
) -> Result<Html<String>, AppError> {
    ensure_privilege(&admin, MANAGE_MATCHING)?;

    let members = MemberRepository::new(state.pool());

    let candidates1 = if query.q1.trim().is_empty() {
        vec![]
    } else {
        members
            .search_by_username(query.q1.trim(), PICKER_LIMIT)
            .await?
            .iter()
            .map(CandidateView::from)
            .collect()
    };

    let candidates2 = if query.q2.trim().is_empty() {
        vec![]
    } else {
        members
            .search_by_username(query.q2.trim(), PICKER_LIMIT)
            .await?
            .iter()
            .map(CandidateView::from)
            .collect()
    };

    let recent = MatchRepository::new(state.pool())
        .list_recent(20)
        .await?
        .iter()
        .map(|m| MatchView {
            member1: m.member1_username.clone(),
            member2: m.member2_username.clone(),
            created_at: m.created_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();

    let template = MatchingIndexTemplate {
        admin: AdminView::from(&admin),
        current_path: "/matching".to_string(),
        q1: query.q1,
        q2: query.q2,
        candidates1,
        candidates2,
        recent,
        error: query.error,
        notice: query.notice,
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Match creation form.
#[derive(Debug, Deserialize)]
struct CreateForm {
    member1_id: MemberId,
    member2_id: MemberId,
    #[serde(default)]
    notes: String,
}

/// Create a test match.
///
/// POST /matching/create
#[instrument(skip(admin, state, form))]
async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    axum::Form(form): axum::Form<CreateForm>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, MANAGE_MATCHING)?;

    if form.member1_id == form.member2_id {
        return Ok(Redirect::to("/matching?error=Cannot+match+a+member+with+themselves")
            .into_response());
    }

    let notes = form.notes.trim();
    let result = MatchRepository::new(state.pool())
        .create(
            form.member1_id,
            form.member2_id,
            admin.id,
            (!notes.is_empty()).then_some(notes),
        )
        .await;

    match result {
        Ok(()) => {
            tracing::info!(
                member1 = %form.member1_id,
                member2 = %form.member2_id,
                admin_id = %admin.id,
                "test match created"
            );
            Ok(Redirect::to("/matching?notice=Match+created").into_response())
        }
        Err(RepositoryError::Conflict(_)) => Ok(Redirect::to(
            "/matching?error=These+members+are+already+matched",
        )
        .into_response()),
        Err(e) => Err(e.into()),
    }
}
