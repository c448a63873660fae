//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (database ping)
//!
//! # Auth
//! GET  /auth/login                 - Login page (renders a fresh challenge)
//! POST /auth/login                 - Challenge + password login
//! POST /auth/logout                - Logout
//! GET  /auth/setup                 - One-time bootstrap page (first admin)
//! POST /auth/setup                 - Create the first full admin
//!
//! # Dashboard
//! GET  /                           - Overview metrics
//!
//! # Members
//! GET  /members                    - Search members
//! GET  /members/{id}               - Member detail / edit form
//! POST /members/{id}/update        - Apply moderation edits
//! POST /members/{id}/delete        - Delete a member
//!
//! # Meta data
//! GET  /metadata                   - Lookup tables and ban lists (tabbed)
//! POST /metadata/{kind}/create     - Add a lookup entry
//! POST /metadata/{kind}/{id}/update - Rename a lookup entry
//! POST /metadata/{kind}/{id}/delete - Remove a lookup entry
//! POST /metadata/bans/...          - Ban list mutations
//!
//! # Feature pages
//! GET/POST /matching, /payments, /messages, /support, /documents,
//!          /registry, /reports
//!
//! # Privileges (full admin only)
//! GET  /privileges                 - Admins and their grants
//! POST /privileges/{id}/grant      - Grant a privilege
//! POST /privileges/{id}/revoke     - Revoke a privilege
//! ```

pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod matching;
pub mod members;
pub mod messages;
pub mod metadata;
pub mod payments;
pub mod privileges;
pub mod registry;
pub mod reports;
pub mod setup;
pub mod support;

use axum::Router;

use crate::state::AppState;

/// Build the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(setup::router())
        .merge(dashboard::router())
        .merge(members::router())
        .merge(metadata::router())
        .merge(matching::router())
        .merge(payments::router())
        .merge(messages::router())
        .merge(support::router())
        .merge(documents::router())
        .merge(registry::router())
        .merge(reports::router())
        .merge(privileges::router())
}
