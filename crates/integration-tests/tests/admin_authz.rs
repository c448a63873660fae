//! Database-backed tests for the privilege resolver.
//!
//! These tests exercise the invariants the dashboard relies on:
//! - grant/revoke idempotence
//! - the grant -> revoke round-trip law
//! - profile resolution failure for accounts without an admin row
//!
//! They require a migrated database (see crate docs) and are `#[ignore]`d
//! otherwise.

#![allow(clippy::unwrap_used)]

use couplet_admin::db::AdminRepository;
use couplet_admin::models::Authority;
use couplet_admin::services::{AdminAuthService, AuthError};
use couplet_core::{AdminId, AdminRole};
use couplet_integration_tests::test_pool;
use uuid::Uuid;

fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@couplet.test", Uuid::new_v4())
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database (ADMIN_TEST_DATABASE_URL)"]
async fn test_grant_is_idempotent() {
    let pool = test_pool().await;
    let repo = AdminRepository::new(&pool);
    let auth = AdminAuthService::new(&pool);

    let profile = auth
        .create_admin(&unique_email("grant"), "test password 1", AdminRole::CustomAdmin)
        .await
        .unwrap();
    let privilege = repo.find_privilege("view_payments").await.unwrap();

    // Granting twice must neither error nor duplicate.
    repo.grant(profile.id, privilege.id, None).await.unwrap();
    repo.grant(profile.id, privilege.id, None).await.unwrap();

    let resolved = repo.resolve_profile(profile.id).await.unwrap();
    assert_eq!(resolved.grants.len(), 1);
    assert!(resolved.permits("view_payments"));
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database (ADMIN_TEST_DATABASE_URL)"]
async fn test_grant_then_revoke_restores_prior_set() {
    let pool = test_pool().await;
    let repo = AdminRepository::new(&pool);
    let auth = AdminAuthService::new(&pool);

    let profile = auth
        .create_admin(&unique_email("roundtrip"), "test password 1", AdminRole::CustomAdmin)
        .await
        .unwrap();
    let keep = repo.find_privilege("manage_support").await.unwrap();
    let transient = repo.find_privilege("delete_users").await.unwrap();
    repo.grant(profile.id, keep.id, None).await.unwrap();

    let before = repo.resolve_profile(profile.id).await.unwrap();

    repo.grant(profile.id, transient.id, None).await.unwrap();
    repo.revoke(profile.id, transient.id).await.unwrap();

    let after = repo.resolve_profile(profile.id).await.unwrap();
    assert_eq!(before.authority, after.authority);
    assert_eq!(before.grants.len(), after.grants.len());
    assert!(after.permits("manage_support"));
    assert!(!after.permits("delete_users"));
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database (ADMIN_TEST_DATABASE_URL)"]
async fn test_revoke_absent_pair_is_a_noop() {
    let pool = test_pool().await;
    let repo = AdminRepository::new(&pool);
    let auth = AdminAuthService::new(&pool);

    let profile = auth
        .create_admin(&unique_email("revoke"), "test password 1", AdminRole::CustomAdmin)
        .await
        .unwrap();
    let privilege = repo.find_privilege("view_reports").await.unwrap();

    // Never granted: revoking must not error.
    repo.revoke(profile.id, privilege.id).await.unwrap();

    let resolved = repo.resolve_profile(profile.id).await.unwrap();
    assert!(resolved.grants.is_empty());
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database (ADMIN_TEST_DATABASE_URL)"]
async fn test_full_admin_needs_no_grants() {
    let pool = test_pool().await;
    let repo = AdminRepository::new(&pool);
    let auth = AdminAuthService::new(&pool);

    let profile = auth
        .create_admin(&unique_email("full"), "test password 1", AdminRole::FullAdmin)
        .await
        .unwrap();

    let resolved = repo.resolve_profile(profile.id).await.unwrap();
    assert_eq!(resolved.authority, Authority::Full);
    assert!(resolved.grants.is_empty());
    assert!(resolved.permits("delete_users"));
    assert!(resolved.permits("privilege_that_does_not_exist"));
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database (ADMIN_TEST_DATABASE_URL)"]
async fn test_unknown_account_resolves_to_not_an_admin() {
    let pool = test_pool().await;
    let auth = AdminAuthService::new(&pool);

    let ghost = AdminId::new(Uuid::new_v4());
    let result = auth.resolve_profile(ghost).await;
    assert!(matches!(result, Err(AuthError::NotAnAdmin)));
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database (ADMIN_TEST_DATABASE_URL)"]
async fn test_login_rejects_account_without_admin_row() {
    let pool = test_pool().await;
    let repo = AdminRepository::new(&pool);
    let auth = AdminAuthService::new(&pool);

    // Create an admin, then delete only the admin row, keeping the account.
    let email = unique_email("orphan");
    let profile = auth
        .create_admin(&email, "test password 1", AdminRole::CustomAdmin)
        .await
        .unwrap();
    sqlx::query("DELETE FROM admin.admin_user WHERE id = $1")
        .bind(profile.id)
        .execute(&pool)
        .await
        .unwrap();

    // Credentials still verify, but the login must fail with NotAnAdmin.
    let result = auth.login(&email, "test password 1", "10", "10").await;
    assert!(matches!(result, Err(AuthError::NotAnAdmin)));

    // And the profile must be unresolvable afterwards.
    let result = repo.resolve_profile(profile.id).await;
    assert!(result.is_err());
}
