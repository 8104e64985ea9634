//! User-facing error kinds.
//!
//! Only two kinds ever reach an operator: a [`ValidationError`] raised before
//! any network call, and a [`RequestError`] for anything that went wrong on
//! the wire. The cause of a request failure is logged where it happens and
//! never shown.

use thiserror::Error;

use crate::validation::ValidationError;

/// A failed backend request, reduced to a human-readable message.
///
/// Transport failures and every non-2xx status collapse into this one type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    message: String,
}

impl RequestError {
    /// Create a request error with the message shown to the operator.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message shown in the page banner.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Either of the two error kinds, as surfaced in an edit form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// Required input was missing; no request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request was made and failed.
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl ViewError {
    /// Returns `true` if this error was raised before any network call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_display() {
        let err = RequestError::new("Failed to load addresses.");
        assert_eq!(err.to_string(), "Failed to load addresses.");
        assert_eq!(err.message(), "Failed to load addresses.");
    }

    #[test]
    fn test_view_error_kinds() {
        let err = ViewError::from(ValidationError::new("Key and Value are required."));
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Key and Value are required.");

        let err = ViewError::from(RequestError::new("Failed to save configuration."));
        assert!(!err.is_validation());
    }
}
