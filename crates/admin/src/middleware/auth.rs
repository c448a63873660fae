//! Authentication extractors for route handlers.
//!
//! The session only stores a minimal [`CurrentAdmin`]; every protected
//! request re-resolves the full profile from the database so that privilege
//! revocations and admin-row deletions take effect immediately. A session
//! whose admin row has disappeared is flushed on the spot.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::{AdminProfile, Authority, CurrentAdmin, session_keys};
use crate::services::{AdminAuthService, AuthError};
use crate::state::AppState;

/// Extractor that requires an authenticated admin.
///
/// If nobody is logged in, redirects HTML requests to the login page and
/// returns 401 for API requests. If the session resolves to an account that
/// is no longer an admin, the session is flushed and an access-denied
/// redirect is returned.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.email)
/// }
/// ```
pub struct RequireAdmin(pub AdminProfile);

/// Rejection for [`RequireAdmin`] and [`RequireFullAdmin`].
pub enum AdminAuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
    /// The session pointed at an account with no admin row.
    AccessDenied,
    /// Full admin required but the admin is scoped.
    Forbidden,
    /// Profile resolution failed.
    Internal,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::AccessDenied => {
                Redirect::to("/auth/login?error=access_denied").into_response()
            }
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                "Only full admins can access this resource",
            )
                .into_response(),
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

/// Resolve the current admin from the session, flushing it when the admin
/// row no longer exists.
async fn resolve_current(
    parts: &Parts,
    session: &Session,
    state: &AppState,
) -> Result<AdminProfile, AdminAuthRejection> {
    let current: CurrentAdmin = session
        .get(session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| {
            if parts.uri.path().starts_with("/api/") {
                AdminAuthRejection::Unauthorized
            } else {
                AdminAuthRejection::RedirectToLogin
            }
        })?;

    let auth = AdminAuthService::new(state.pool());
    match auth.resolve_profile(current.id).await {
        Ok(profile) => Ok(profile),
        Err(AuthError::NotAnAdmin) => {
            // Authentication alone does not make an admin; drop the session.
            tracing::warn!(admin_id = %current.id, "session resolved to a non-admin, flushing");
            let _ = session.flush().await;
            Err(AdminAuthRejection::AccessDenied)
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to resolve admin profile");
            Err(AdminAuthRejection::Internal)
        }
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        let profile = resolve_current(parts, &session, state).await?;
        Ok(Self(profile))
    }
}

/// Extractor that requires a full admin.
///
/// Scoped admins get 403 regardless of their grant set.
pub struct RequireFullAdmin(pub AdminProfile);

impl FromRequestParts<AppState> for RequireFullAdmin {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        let profile = resolve_current(parts, &session, state).await?;

        if profile.authority != Authority::Full {
            return Err(AdminAuthRejection::Forbidden);
        }

        Ok(Self(profile))
    }
}

/// Guard a handler body on a named privilege.
///
/// # Errors
///
/// Returns `AppError::Forbidden` when the admin's authority does not permit
/// the action.
pub fn ensure_privilege(admin: &AdminProfile, action: &str) -> Result<(), AppError> {
    if admin.permits(action) {
        return Ok(());
    }
    Err(AppError::Forbidden(format!(
        "missing privilege: {action}"
    )))
}

/// Helper to set the current admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Helper to clear the current admin from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}
