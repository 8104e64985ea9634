//! Address book records.

use serde::{Deserialize, Serialize};

use crate::validation::{Validate, ValidationError, is_blank};

/// A customer address keyed by mobile number.
///
/// The mobile number is the natural identifier: it is chosen at creation and
/// is never editable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub mobile_number: String,
    #[serde(default)]
    pub name: String,
    pub address: String,
}

impl Address {
    /// Message shown when the mobile number or address is empty.
    pub const REQUIRED_MESSAGE: &'static str = "Mobile number and address are required.";

    /// Create an address record.
    #[must_use]
    pub fn new(
        mobile_number: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            mobile_number: mobile_number.into(),
            name: name.into(),
            address: address.into(),
        }
    }
}

impl Validate for Address {
    fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.mobile_number) {
            return Err(ValidationError::for_field(
                "mobile_number",
                Self::REQUIRED_MESSAGE,
            ));
        }
        if is_blank(&self.address) {
            return Err(ValidationError::for_field("address", Self::REQUIRED_MESSAGE));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_optional() {
        assert!(Address::new("55512345", "", "Doha").validate().is_ok());
    }

    #[test]
    fn test_requires_mobile_and_address() {
        let err = Address::new("", "Ali", "X").validate().unwrap_err();
        assert_eq!(err.field(), Some("mobile_number"));
        assert!(err.message().starts_with("Mobile number and address are required"));

        let err = Address::new("55512345", "Ali", "").validate().unwrap_err();
        assert_eq!(err.field(), Some("address"));
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let json = serde_json::to_value(Address::new("555", "Ali", "Doha")).unwrap();
        assert_eq!(json["mobileNumber"], "555");
        assert_eq!(json["address"], "Doha");

        let parsed: Address =
            serde_json::from_str(r#"{"mobileNumber":"777","address":"Wakra"}"#).unwrap();
        assert_eq!(parsed.name, "");
    }
}
