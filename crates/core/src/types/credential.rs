//! Login credentials.
//!
//! The password is held as a [`SecretString`] so it never appears in logs or
//! `Debug` output; it is exposed only when the request body is serialized.

use secrecy::{ExposeSecret, SecretString};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::validation::{Validate, ValidationError, is_blank};

/// Username and password sent to the backend login endpoint.
#[derive(Clone)]
pub struct LoginCredentials {
    pub username: String,
    pub password: SecretString,
}

impl LoginCredentials {
    /// Message shown when the backend rejects the credentials.
    pub const FAILURE_MESSAGE: &'static str =
        "Login failed. Please check your username and password.";

    /// Create credentials from form input.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Serialize for LoginCredentials {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LoginCredentials", 2)?;
        state.serialize_field("username", &self.username)?;
        state.serialize_field("password", self.password.expose_secret())?;
        state.end()
    }
}

impl Validate for LoginCredentials {
    fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.username) || self.password.expose_secret().is_empty() {
            return Err(ValidationError::new("Username and password are required."));
        }
        Ok(())
    }
}
