//! Unified error handling for admin.
//!
//! Screen handlers report backend failures inside the rendered page (banner
//! or dialog). `AppError` covers what is left: malformed submissions and
//! failures of the session store.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors that end a request without rendering a screen.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session store failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Upload body could not be read.
    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Session(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Session store failed"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            Self::Multipart(_) | Self::BadRequest(_) => {
                tracing::debug!(error = %self, "Rejected request");
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_keeps_message() {
        let err = AppError::BadRequest("unknown upload kind".to_string());
        assert_eq!(err.to_string(), "Bad request: unknown upload kind");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
