//! Business logic services for the admin dashboard.
//!
//! # Services
//!
//! - `auth` - password authentication gated by the login challenge
//! - `challenge` - arithmetic login challenge generation and verification

pub mod auth;
pub mod challenge;

pub use auth::{AdminAuthService, AuthError};
pub use challenge::LoginChallenge;
