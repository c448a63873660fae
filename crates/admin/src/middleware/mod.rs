//! HTTP middleware and extractors.
//!
//! # Layer Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//!
//! Route-level auth is handled by extractors ([`RequireAdmin`],
//! [`RequireFullAdmin`]) rather than a blanket layer, so the login and
//! bootstrap routes stay reachable.

pub mod auth;
pub mod session;

pub use auth::{
    RequireAdmin, RequireFullAdmin, clear_current_admin, ensure_privilege, set_current_admin,
};
pub use session::create_session_layer;
