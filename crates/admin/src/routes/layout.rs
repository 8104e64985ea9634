//! Page chrome shared by every screen.

use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use falcon_core::{RequestError, Screen};

/// Sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

/// Title, sidebar and page-level messages.
#[derive(Debug, Clone)]
pub struct Shell {
    pub title: &'static str,
    pub authenticated: bool,
    pub nav: Vec<NavItem>,
    /// Request error banner.
    pub banner: Option<String>,
    /// Success notice.
    pub notice: Option<String>,
}

impl Shell {
    /// Chrome for `screen`. The sidebar is only listed for an open session.
    #[must_use]
    pub fn new(screen: Screen, authenticated: bool) -> Self {
        let nav = if authenticated {
            Screen::SIDEBAR
                .into_iter()
                .map(|item| NavItem {
                    label: item.label(),
                    path: item.path(),
                    active: item == screen,
                })
                .collect()
        } else {
            vec![]
        };

        Self {
            title: screen.label(),
            authenticated,
            nav,
            banner: None,
            notice: None,
        }
    }

    /// Show the view's request error, if any.
    #[must_use]
    pub fn with_error(mut self, error: Option<&RequestError>) -> Self {
        if let Some(error) = error {
            self.banner = Some(error.message().to_owned());
        }
        self
    }

    #[must_use]
    pub fn with_banner(mut self, message: impl Into<String>) -> Self {
        self.banner = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_notice(mut self, message: impl Into<String>) -> Self {
        self.notice = Some(message.into());
        self
    }
}

/// A blocking acknowledgment. The OK link dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub message: String,
    pub ok_href: String,
}

impl Dialog {
    #[must_use]
    pub fn new(message: impl Into<String>, ok_href: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ok_href: ok_href.into(),
        }
    }
}

/// A label/value line outside a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
    pub class: &'static str,
}

impl SummaryLine {
    #[must_use]
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            class: "",
        }
    }

    /// A line marked `positive` or `negative`.
    #[must_use]
    pub fn signed(label: &'static str, value: impl Into<String>, negative: bool) -> Self {
        Self {
            label,
            value: value.into(),
            class: if negative { "negative" } else { "positive" },
        }
    }
}

/// Render a template into an HTML response.
pub fn render<T: Template>(template: &T) -> Response {
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}")),
    )
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_hidden_without_session() {
        let shell = Shell::new(Screen::Login, false);
        assert!(shell.nav.is_empty());
        assert_eq!(shell.title, "Login");
    }

    #[test]
    fn test_sidebar_marks_active_screen() {
        let shell = Shell::new(Screen::ConfigManager, true);
        assert_eq!(shell.nav.len(), Screen::SIDEBAR.len());
        let active: Vec<_> = shell.nav.iter().filter(|n| n.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].path, "/configmanager");
    }

    #[test]
    fn test_request_error_becomes_banner() {
        let error = RequestError::new("Failed to fetch data");
        let shell = Shell::new(Screen::Dashboard, true).with_error(Some(&error));
        assert_eq!(shell.banner.as_deref(), Some("Failed to fetch data"));
    }
}
