//! Authentication route handlers: login page, login submit, logout.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::middleware::set_current_admin;
use crate::models::{CurrentAdmin, session_keys};
use crate::services::{AdminAuthService, AuthError, LoginChallenge};
use crate::state::AppState;

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginPageTemplate {
    question: String,
    error: Option<String>,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login_submit))
        .route("/auth/logout", post(logout))
}

/// Query parameters on the login page (error codes from redirects).
#[derive(Debug, Deserialize)]
struct LoginQuery {
    error: Option<String>,
}

fn error_message(code: &str) -> String {
    match code {
        "invalid_challenge" => "Challenge answer was wrong. Please try again.".to_owned(),
        "invalid_credentials" => "Invalid email or password.".to_owned(),
        "access_denied" => "Access denied: this account is not an admin.".to_owned(),
        "challenge_expired" => "The challenge expired. Please try again.".to_owned(),
        _ => "Login failed. Please try again.".to_owned(),
    }
}

/// Render the login page with a fresh challenge.
///
/// GET /auth/login
async fn login_page(session: Session, Query(query): Query<LoginQuery>) -> impl IntoResponse {
    let challenge = LoginChallenge::generate();

    // Store the expected answer; the submit handler consumes it.
    if let Err(e) = session
        .insert(session_keys::LOGIN_CHALLENGE, &challenge.answer)
        .await
    {
        tracing::error!(error = %e, "failed to store login challenge");
    }

    let template = LoginPageTemplate {
        question: challenge.question,
        error: query.error.as_deref().map(error_message),
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

/// Login form fields.
#[derive(Debug, Deserialize)]
struct LoginForm {
    email: String,
    password: String,
    challenge_answer: String,
}

/// Handle a login attempt.
///
/// POST /auth/login
async fn login_submit(
    State(state): State<AppState>,
    session: Session,
    axum::Form(form): axum::Form<LoginForm>,
) -> impl IntoResponse {
    // The stored answer is one-time use: consume it before verification so
    // a failed attempt always gets a fresh challenge.
    let expected: Option<String> = session
        .get(session_keys::LOGIN_CHALLENGE)
        .await
        .ok()
        .flatten();
    let _ = session
        .remove::<String>(session_keys::LOGIN_CHALLENGE)
        .await;

    let Some(expected) = expected else {
        return Redirect::to("/auth/login?error=challenge_expired");
    };

    let auth = AdminAuthService::new(state.pool());
    match auth
        .login(&form.email, &form.password, &expected, &form.challenge_answer)
        .await
    {
        Ok(profile) => {
            let current = CurrentAdmin {
                id: profile.id,
                email: profile.email.clone(),
            };
            if let Err(e) = set_current_admin(&session, &current).await {
                tracing::error!(error = %e, "failed to store session identity");
                return Redirect::to("/auth/login?error=session");
            }

            set_sentry_user(profile.id, Some(profile.email.as_str()));
            tracing::info!(admin_id = %profile.id, "admin logged in");
            Redirect::to("/")
        }
        Err(AuthError::InvalidChallenge) => Redirect::to("/auth/login?error=invalid_challenge"),
        Err(AuthError::InvalidCredentials) => {
            Redirect::to("/auth/login?error=invalid_credentials")
        }
        Err(AuthError::NotAnAdmin) => {
            // Credentials were valid but there is no admin row: drop the
            // whole session, do not keep any authenticated state.
            let _ = session.flush().await;
            tracing::warn!(email = %form.email, "login by non-admin account rejected");
            Redirect::to("/auth/login?error=access_denied")
        }
        Err(e) => {
            tracing::error!(error = %e, "login failed");
            Redirect::to("/auth/login?error=internal")
        }
    }
}

/// Logout: clear the session immediately and redirect to login.
///
/// POST /auth/logout
async fn logout(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    clear_sentry_user();

    Redirect::to("/auth/login")
}
