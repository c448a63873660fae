//! Integration tests for the Couplet admin dashboard.
//!
//! # Running Tests
//!
//! ```bash
//! # Start a PostgreSQL database and run migrations
//! cargo run -p couplet-cli -- migrate
//!
//! # Run the database-backed tests
//! ADMIN_TEST_DATABASE_URL=postgres://localhost/couplet_test \
//!     cargo test -p couplet-integration-tests -- --ignored
//!
//! # The HTTP tests additionally need a running server
//! cargo run -p couplet-admin
//! ```
//!
//! Tests that need external resources are marked `#[ignore]` so that a bare
//! `cargo test` stays green on a machine without a database.

#![cfg_attr(not(test), forbid(unsafe_code))]

use sqlx::PgPool;

/// Base URL for the admin server (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Connect to the test database named by `ADMIN_TEST_DATABASE_URL`.
///
/// # Panics
///
/// Panics if the variable is unset or the database is unreachable; callers
/// are `#[ignore]`d tests that explicitly opted in.
pub async fn test_pool() -> PgPool {
    let url = std::env::var("ADMIN_TEST_DATABASE_URL")
        .expect("ADMIN_TEST_DATABASE_URL must be set for integration tests");
    PgPool::connect(&url)
        .await
        .expect("failed to connect to the test database")
}

/// Build an HTTP client with a cookie store (sessions).
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("failed to create HTTP client")
}
