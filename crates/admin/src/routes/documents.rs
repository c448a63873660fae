//! Help document route handlers.

use askama::Template;
use axum::{
    Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use couplet_core::DocumentId;

use crate::db::HelpDocRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, ensure_privilege};
use crate::models::HelpDocument;
use crate::state::AppState;

use super::dashboard::AdminView;

/// Privilege guarding the documents pages.
const MANAGE_DOCUMENTS: &str = "manage_documents";

/// Document row view for templates.
#[derive(Debug, Clone)]
pub struct DocumentView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub version: i32,
    pub is_published: bool,
    pub updated_at: String,
}

impl From<&HelpDocument> for DocumentView {
    fn from(doc: &HelpDocument) -> Self {
        Self {
            id: doc.id.to_string(),
            title: doc.title.clone(),
            category: doc.category.clone(),
            version: doc.version,
            is_published: doc.is_published,
            updated_at: doc.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Documents list template.
#[derive(Template)]
#[template(path = "documents/index.html")]
struct DocumentsIndexTemplate {
    admin: AdminView,
    current_path: String,
    documents: Vec<DocumentView>,
}

/// Document edit template.
#[derive(Template)]
#[template(path = "documents/edit.html")]
struct DocumentEditTemplate {
    admin: AdminView,
    current_path: String,
    doc: DocumentView,
    content: String,
}

/// Build the documents router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/documents", get(index))
        .route("/documents/create", post(create))
        .route("/documents/{id}", get(edit_page))
        .route("/documents/{id}/update", post(update))
        .route("/documents/{id}/delete", post(delete))
}

/// Documents list page with the create form.
///
/// GET /documents
#[instrument(skip(admin, state))]
async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    ensure_privilege(&admin, MANAGE_DOCUMENTS)?;

    let documents = HelpDocRepository::new(state.pool())
        .list()
        .await?
        .iter()
        .map(DocumentView::from)
        .collect();

    let template = DocumentsIndexTemplate {
        admin: AdminView::from(&admin),
        current_path: "/documents".to_string(),
        documents,
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Create form fields.
#[derive(Debug, Deserialize)]
struct CreateForm {
    title: String,
    category: String,
    content: String,
}

/// Create a new (unpublished) document.
///
/// POST /documents/create
#[instrument(skip(admin, state, form))]
async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    axum::Form(form): axum::Form<CreateForm>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, MANAGE_DOCUMENTS)?;

    let title = form.title.trim();
    let category = form.category.trim();
    if title.is_empty() || category.is_empty() {
        return Ok(Redirect::to("/documents").into_response());
    }

    let doc = HelpDocRepository::new(state.pool())
        .create(title, form.content.trim(), category, admin.id)
        .await?;

    Ok(Redirect::to(&format!("/documents/{}", doc.id)).into_response())
}

/// Document edit page.
///
/// GET /documents/{id}
#[instrument(skip(admin, state))]
async fn edit_page(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
) -> Result<Html<String>, AppError> {
    ensure_privilege(&admin, MANAGE_DOCUMENTS)?;

    let doc = HelpDocRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("document {id}")))?;

    let template = DocumentEditTemplate {
        admin: AdminView::from(&admin),
        current_path: "/documents".to_string(),
        content: doc.content.clone(),
        doc: DocumentView::from(&doc),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Edit form fields.
#[derive(Debug, Deserialize)]
struct UpdateForm {
    title: String,
    category: String,
    content: String,
    /// Checkbox: absent when unchecked.
    is_published: Option<String>,
}

/// Apply edits (bumps the version).
///
/// POST /documents/{id}/update
#[instrument(skip(admin, state, form))]
async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
    axum::Form(form): axum::Form<UpdateForm>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, MANAGE_DOCUMENTS)?;

    HelpDocRepository::new(state.pool())
        .update(
            id,
            form.title.trim(),
            form.content.trim(),
            form.category.trim(),
            form.is_published.is_some(),
        )
        .await?;

    tracing::info!(document_id = %id, admin_id = %admin.id, "help document updated");

    Ok(Redirect::to(&format!("/documents/{id}")).into_response())
}

/// Delete a document.
///
/// POST /documents/{id}/delete
#[instrument(skip(admin, state))]
async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, MANAGE_DOCUMENTS)?;

    HelpDocRepository::new(state.pool()).delete(id).await?;

    Ok(Redirect::to("/documents").into_response())
}
