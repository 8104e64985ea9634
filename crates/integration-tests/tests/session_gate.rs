//! Login, logout and the restricted-screen gate.

#![allow(clippy::unwrap_used)]

use falcon_core::LoginCredentials;
use falcon_integration_tests::{ADMIN_PASSWORD, TestContext};
use reqwest::{StatusCode, header};

fn location(response: &reqwest::Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn test_restricted_screen_without_session_shows_login() {
    let ctx = TestContext::new().await;
    let html = ctx.page("/dayreport").await;

    assert!(html.contains("name=\"password\""));
    assert!(html.contains("value=\"/dayreport\""));
    assert!(!html.contains("class=\"sidebar\""));
    assert!(ctx.backend.requests().is_empty());
}

#[tokio::test]
async fn test_wrong_password_keeps_gate_closed() {
    let ctx = TestContext::new().await;
    let response = ctx.login("wrong", "/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();

    assert!(html.contains(LoginCredentials::FAILURE_MESSAGE));
    assert!(html.contains("value=\"admin\""));
    assert_eq!(ctx.backend.count("POST /api/auth/login"), 1);

    let html = ctx.page("/dashboard").await;
    assert!(html.contains("name=\"password\""));
}

#[tokio::test]
async fn test_login_returns_to_requested_screen() {
    let ctx = TestContext::new().await;
    let response = ctx.login(ADMIN_PASSWORD, "/monthlyreport").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/monthlyreport");
}

#[tokio::test]
async fn test_login_ignores_unrestricted_next() {
    let ctx = TestContext::new().await;
    let response = ctx.login(ADMIN_PASSWORD, "/login").await;
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_logout_closes_gate() {
    let ctx = TestContext::logged_in().await;
    let html = ctx.page("/configmanager").await;
    assert!(html.contains("class=\"sidebar\""));

    let response = ctx.client.post(ctx.url("/logout")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    ctx.backend.clear_requests();
    let html = ctx.page("/configmanager").await;
    assert!(html.contains("name=\"password\""));
    assert!(ctx.backend.requests().is_empty());
}

#[tokio::test]
async fn test_root_and_unknown_paths_redirect_to_dashboard_when_logged_in() {
    let ctx = TestContext::logged_in().await;

    let response = ctx.get("/").await;
    assert_eq!(location(&response), "/dashboard");

    let response = ctx.get("/nowhere").await;
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_mixed_case_path_redirects_to_canonical_screen() {
    let ctx = TestContext::logged_in().await;
    let response = ctx.get("/DayReport?date=2025-01-06").await;

    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/dayreport?date=2025-01-06");
}
