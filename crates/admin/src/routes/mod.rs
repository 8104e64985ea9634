//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /                       - Dashboard or login, depending on the session
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Check credentials, open the session gate
//! POST /logout                 - Close the session gate
//!
//! # Reports
//! GET  /dashboard              - Actual income by sport
//! GET  /dayreport              - Day report (?date=)
//! GET  /last7days              - Daily income summary for the last 7 days
//! GET  /monthlyreport          - Monthly report (?month=&year=)
//! GET  /pendingamounts         - Pending amounts (?fromDate=&toDate=)
//!
//! # Invoices and uploads
//! GET  /invoicegenerate        - Invoice search (?query=)
//! POST /invoicegenerate/pdf    - Download Invoice.pdf for the selected rows
//! GET  /uploadpage             - Upload forms
//! POST /uploadpage             - Upload a bookings or cancellations spreadsheet
//!
//! # Records
//! GET  /configmanager          - Config list (?add, ?edit=KEY)
//! POST /configmanager          - Create or update a config entry
//! GET  /addressbook            - Address list (?add, ?edit=MOBILE)
//! POST /addressbook            - Create or update an address
//! ```
//!
//! Every other path goes through [`navigation::resolve`]: screen paths in
//! another case are redirected to their canonical path, unknown paths to
//! the dashboard or the login screen.

use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use falcon_core::{Route, Screen, navigation};

use crate::middleware::CurrentSession;
use crate::state::AppState;

pub mod address_book;
pub mod auth;
pub mod config_manager;
pub mod dashboard;
pub mod invoice;
pub mod layout;
pub mod reports;
pub mod upload;

/// Build the complete route table.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(reports::router())
        .merge(invoice::router())
        .merge(upload::router())
        .merge(config_manager::router())
        .merge(address_book::router())
        .fallback(shell_fallback)
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}

/// Resolve any path without a dedicated route.
async fn shell_fallback(CurrentSession(gate): CurrentSession, request: Request) -> Response {
    let path = request.uri().path();

    match navigation::resolve(path, gate.is_authenticated()) {
        Route::Render(Screen::Login) if path == "/" => {
            auth::render_login(Screen::Dashboard.path(), "", None)
        }
        Route::Render(Screen::Login) => auth::render_login(path, "", None),
        Route::Render(screen) if screen.path() != path => {
            Redirect::to(&with_query(screen.path(), &request)).into_response()
        }
        Route::Render(screen) => {
            // Dedicated routes cover every canonical screen path; only a
            // method mismatch lands here.
            tracing::debug!(%screen, method = %request.method(), "Unrouted method");
            StatusCode::METHOD_NOT_ALLOWED.into_response()
        }
        Route::Redirect(screen) => Redirect::to(screen.path()).into_response(),
    }
}

fn with_query(path: &str, request: &Request) -> String {
    request
        .uri()
        .query()
        .map_or_else(|| path.to_owned(), |query| format!("{path}?{query}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request as HttpRequest, StatusCode, header};
    use tower::ServiceExt;

    use crate::config::AdminConfig;
    use crate::state::AppState;

    fn app() -> axum::Router {
        // Nothing listens on the discard port; no test below reaches the backend.
        let config = AdminConfig::local("http://127.0.0.1:9").unwrap();
        crate::app(AppState::new(config).unwrap())
    }

    async fn get(path: &str) -> axum::response::Response {
        app()
            .oneshot(HttpRequest::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = get("/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_restricted_screen_shows_login_in_place() {
        let response = get("/configmanager").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("action=\"/login\""));
        assert!(html.contains("value=\"/configmanager\""));
        assert!(!html.contains("class=\"sidebar\""));
    }

    #[tokio::test]
    async fn test_root_without_session_shows_login() {
        let html = body_text(get("/").await).await;
        assert!(html.contains("name=\"password\""));
    }

    #[tokio::test]
    async fn test_unknown_path_redirects_to_login() {
        let response = get("/no-such-screen").await;
        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_mixed_case_path_without_session_shows_login() {
        let response = get("/ConfigManager").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("value=\"/ConfigManager\""));
    }

    #[tokio::test]
    async fn test_security_headers_and_request_id() {
        let response = get("/login").await;
        assert_eq!(response.headers()["x-frame-options"], "DENY");
        assert!(response.headers().contains_key("x-request-id"));
    }
}
