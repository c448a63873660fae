//! One-time bootstrap flow: create the first full admin.
//!
//! The page is only reachable while no admin exists; once the first full
//! admin is created the routes redirect to the login page.

use askama::Template;
use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tower_sessions::Session;

use couplet_core::AdminRole;

use crate::db::AdminRepository;
use crate::error::AppError;
use crate::middleware::set_current_admin;
use crate::models::CurrentAdmin;
use crate::services::{AdminAuthService, AuthError};
use crate::state::AppState;

/// Setup page template.
#[derive(Template)]
#[template(path = "auth/setup.html")]
struct SetupPageTemplate {
    error: Option<String>,
}

/// Build the setup router.
pub fn router() -> Router<AppState> {
    Router::new().route("/auth/setup", get(setup_page).post(setup_submit))
}

/// Render the bootstrap page, or bounce to login when an admin exists.
///
/// GET /auth/setup
async fn setup_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let admins = AdminRepository::new(state.pool());
    if !admins.is_empty().await? {
        return Ok(Redirect::to("/auth/login").into_response());
    }

    let template = SetupPageTemplate { error: None };
    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
    .into_response())
}

/// Bootstrap form fields.
#[derive(Debug, Deserialize)]
struct SetupForm {
    email: String,
    password: String,
    confirm_password: String,
}

/// Create the first full admin and log them in.
///
/// POST /auth/setup
async fn setup_submit(
    State(state): State<AppState>,
    session: Session,
    axum::Form(form): axum::Form<SetupForm>,
) -> Result<Response, AppError> {
    let admins = AdminRepository::new(state.pool());
    if !admins.is_empty().await? {
        return Ok(Redirect::to("/auth/login").into_response());
    }

    if form.password != form.confirm_password {
        return Ok(render_error("Passwords do not match"));
    }

    let auth = AdminAuthService::new(state.pool());
    let profile = match auth
        .create_admin(&form.email, &form.password, AdminRole::FullAdmin)
        .await
    {
        Ok(profile) => profile,
        Err(AuthError::WeakPassword { min }) => {
            return Ok(render_error(&format!(
                "Password must be at least {min} characters"
            )));
        }
        Err(AuthError::InvalidEmail(e)) => {
            return Ok(render_error(&format!("Invalid email: {e}")));
        }
        Err(AuthError::AccountExists) => {
            return Ok(render_error("An account already exists with this email"));
        }
        Err(e) => return Err(e.into()),
    };

    let current = CurrentAdmin {
        id: profile.id,
        email: profile.email.clone(),
    };
    set_current_admin(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    tracing::info!(admin_id = %profile.id, "first full admin created via bootstrap");

    Ok(Redirect::to("/").into_response())
}

fn render_error(message: &str) -> Response {
    let template = SetupPageTemplate {
        error: Some(message.to_owned()),
    };
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
    .into_response()
}
