//! Client-side required-field validation.
//!
//! Validation runs synchronously and always before a request is built, so a
//! failing check guarantees the backend is never contacted.

use thiserror::Error;

/// A required input was missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    field: Option<&'static str>,
}

impl ValidationError {
    /// Create a validation error not tied to a single field.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }

    /// Create a validation error pointing at the offending field.
    #[must_use]
    pub fn for_field(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field),
        }
    }

    /// The message shown next to the field or in the dialog banner.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The form field this error refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        self.field
    }
}

/// A record that can check its own required fields.
pub trait Validate {
    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the first problem found.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Returns `true` if the input is empty or whitespace only.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
