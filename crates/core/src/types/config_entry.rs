//! Configuration key/value entries.

use serde::{Deserialize, Serialize};

use crate::validation::{Validate, ValidationError, is_blank};

/// One backend configuration setting.
///
/// The key is the natural identifier and cannot change once created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

impl ConfigEntry {
    /// Message shown when either field is empty.
    pub const REQUIRED_MESSAGE: &'static str = "Key and Value are required.";

    /// Create an entry.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Validate for ConfigEntry {
    fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.key) {
            return Err(ValidationError::for_field("key", Self::REQUIRED_MESSAGE));
        }
        if is_blank(&self.value) {
            return Err(ValidationError::for_field("value", Self::REQUIRED_MESSAGE));
        }
        Ok(())
    }
}
