//! Invoice search results and PDF requests.

use serde::{Deserialize, Deserializer, Serialize};

use super::amount::Amount;
use crate::validation::{ValidationError, is_blank};

/// Message shown when the search box is empty.
pub const EMPTY_SEARCH_MESSAGE: &str =
    "Please enter a search query before clicking the search button.";

/// Message shown when no rows are selected for the PDF.
pub const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one row to generate the PDF.";

/// Check the invoice search query before calling the backend.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the query is blank.
pub fn validate_search_query(query: &str) -> Result<(), ValidationError> {
    if is_blank(query) {
        return Err(ValidationError::for_field("query", EMPTY_SEARCH_MESSAGE));
    }
    Ok(())
}

/// One billable slot returned by the invoice search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub slotdate: String,
    #[serde(default)]
    pub slottime: String,
    #[serde(default)]
    pub slothours: Amount,
    #[serde(default)]
    pub slotamount: Amount,
    #[serde(default)]
    pub bookingcode: String,
}

// Row ids arrive as strings from some deployments and numbers from others.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Body of the PDF generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRequest {
    /// Comma-joined booking codes of the selected rows.
    pub records: String,
    pub mobilenumber: String,
}

impl InvoiceRequest {
    /// Build a request from the search results and the selected row ids.
    ///
    /// Booking codes are joined in result order, not selection order.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if no listed row is selected.
    pub fn from_selection<S: AsRef<str>>(
        mobile_number: &str,
        items: &[InvoiceLineItem],
        selected_ids: &[S],
    ) -> Result<Self, ValidationError> {
        let codes: Vec<&str> = items
            .iter()
            .filter(|item| selected_ids.iter().any(|id| id.as_ref() == item.id))
            .map(|item| item.bookingcode.as_str())
            .collect();

        if codes.is_empty() {
            return Err(ValidationError::for_field("selected", EMPTY_SELECTION_MESSAGE));
        }

        Ok(Self {
            records: codes.join(","),
            mobilenumber: mobile_number.to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn items() -> Vec<InvoiceLineItem> {
        serde_json::from_value(serde_json::json!([
            {"id": "1", "slotdate": "2025-01-06", "slottime": "18:00", "slothours": 1, "slotamount": 200, "bookingcode": "BK1"},
            {"id": 2, "slotdate": "2025-01-07", "slottime": "19:00", "slothours": 1.5, "slotamount": 300, "bookingcode": "BK2"},
            {"id": "3", "slotdate": "2025-01-08", "slottime": "20:00", "slothours": 2, "slotamount": 400, "bookingcode": "BK3"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_blank_search_is_rejected() {
        assert_eq!(
            validate_search_query("  ").unwrap_err().message(),
            EMPTY_SEARCH_MESSAGE
        );
        assert!(validate_search_query("55512345").is_ok());
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        assert_eq!(items()[1].id, "2");
    }

    #[test]
    fn test_selection_joins_codes_in_result_order() {
        let request = InvoiceRequest::from_selection("55512345", &items(), &["3", "1"]).unwrap();
        assert_eq!(request.records, "BK1,BK3");
        assert_eq!(request.mobilenumber, "55512345");
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let none: [&str; 0] = [];
        let err = InvoiceRequest::from_selection("55512345", &items(), &none).unwrap_err();
        assert_eq!(err.message(), EMPTY_SELECTION_MESSAGE);

        // Ids that are not in the result set do not count.
        assert!(InvoiceRequest::from_selection("55512345", &items(), &["99"]).is_err());
    }
}
