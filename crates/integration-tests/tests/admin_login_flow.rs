//! HTTP-level tests for the login flow and route guards.
//!
//! These tests require a running admin server (cargo run -p couplet-admin)
//! and are `#[ignore]`d otherwise.

#![allow(clippy::unwrap_used)]

use couplet_integration_tests::{admin_base_url, http_client};
use reqwest::StatusCode;

#[tokio::test]
#[ignore = "Requires a running admin server"]
async fn test_login_page_renders_a_challenge() {
    let client = http_client();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/auth/login"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("challenge_answer"));
    assert!(body.contains("= ?"));
}

#[tokio::test]
#[ignore = "Requires a running admin server"]
async fn test_wrong_challenge_answer_redirects_back_with_error() {
    let client = http_client();
    let base_url = admin_base_url();

    // Render the login page first so a challenge lands in the session.
    client
        .get(format!("{base_url}/auth/login"))
        .send()
        .await
        .unwrap();

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .form(&[
            ("email", "a@b.com"),
            ("password", "pw"),
            ("challenge_answer", "definitely wrong"),
        ])
        .send()
        .await
        .unwrap();

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("error=invalid_challenge"));
}

#[tokio::test]
#[ignore = "Requires a running admin server"]
async fn test_protected_page_redirects_anonymous_to_login() {
    let client = http_client();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/members"))
        .send()
        .await
        .unwrap();

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.starts_with("/auth/login"));
}

#[tokio::test]
#[ignore = "Requires a running admin server"]
async fn test_health_endpoints() {
    let client = http_client();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
