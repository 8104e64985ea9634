//! Authentication route handlers for admin.
//!
//! Credentials are checked by the backend; a successful answer opens the
//! session gate. The gate is a display switch only.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use falcon_core::{LoginCredentials, Screen};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::CurrentSession;
use crate::state::AppState;

use super::layout::{Shell, render};

/// Login page template.
#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    shell: Shell,
    next: String,
    username: String,
    error: Option<String>,
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub next: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}

/// Render the login page.
///
/// `next` is the screen to return to after a successful login.
pub fn render_login(next: &str, username: &str, error: Option<&str>) -> Response {
    render(&LoginTemplate {
        shell: Shell::new(Screen::Login, false),
        next: next.to_owned(),
        username: username.to_owned(),
        error: error.map(str::to_owned),
    })
}

/// Where to go after logging in: `next` if it names a restricted screen.
fn landing_path(next: &str) -> &'static str {
    Screen::from_path(next)
        .filter(|screen| screen.is_restricted())
        .unwrap_or(Screen::Dashboard)
        .path()
}

/// GET /login
async fn login_page() -> Response {
    render_login(Screen::Dashboard.path(), "", None)
}

/// POST /login
#[instrument(skip(state, gate, form), fields(username = %form.username))]
async fn login(
    State(state): State<AppState>,
    CurrentSession(mut gate): CurrentSession,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let credentials = LoginCredentials::new(form.username.trim(), form.password);

    if let Err(e) = state.api().login(&credentials).await {
        tracing::warn!(error = %e, "Login rejected");
        return Ok(render_login(
            &form.next,
            &credentials.username,
            Some(LoginCredentials::FAILURE_MESSAGE),
        ));
    }

    gate.login().await?;
    tracing::info!("Session opened");
    Ok(Redirect::to(landing_path(&form.next)).into_response())
}

/// POST /logout
async fn logout(CurrentSession(mut gate): CurrentSession) -> Result<Redirect, AppError> {
    gate.logout().await?;
    Ok(Redirect::to(Screen::Login.path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_path_prefers_requested_screen() {
        assert_eq!(landing_path("/monthlyreport"), "/monthlyreport");
        assert_eq!(landing_path("/ConfigManager"), "/configmanager");
    }

    #[test]
    fn test_landing_path_falls_back_to_dashboard() {
        assert_eq!(landing_path(""), "/dashboard");
        assert_eq!(landing_path("/login"), "/dashboard");
        assert_eq!(landing_path("https://evil.example/"), "/dashboard");
    }

    #[test]
    fn test_login_page_renders_form() {
        let response = render_login("/dayreport", "admin", Some("Login failed."));
        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }
}
