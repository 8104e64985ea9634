//! Spreadsheet upload kinds.

use core::fmt;

use crate::validation::ValidationError;

/// The two spreadsheets the backend ingests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadKind {
    Bookings,
    Cancellations,
}

impl UploadKind {
    /// Accepted spreadsheet extensions.
    pub const EXTENSIONS: [&'static str; 2] = [".xlsx", ".xls"];

    /// Both kinds, in display order.
    pub const ALL: [Self; 2] = [Self::Bookings, Self::Cancellations];

    /// Final path segment under `/api/upload/`.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Bookings => "upload",
            Self::Cancellations => "uploadcancel",
        }
    }

    /// Word the file name must contain (case-insensitive).
    #[must_use]
    pub const fn name_marker(self) -> &'static str {
        match self {
            Self::Bookings => "booking",
            Self::Cancellations => "cancel",
        }
    }

    /// Plural noun used in messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Bookings => "bookings",
            Self::Cancellations => "cancellations",
        }
    }

    /// Form field and URL slug.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        self.name_marker()
    }

    /// Parse a form slug (`booking` / `cancel`).
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    /// Check a selected file before uploading it.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if no file was chosen, the name lacks
    /// the marker word, or the extension is not a spreadsheet.
    pub fn validate_file_name(self, file_name: Option<&str>) -> Result<(), ValidationError> {
        let Some(name) = file_name.filter(|n| !n.trim().is_empty()) else {
            return Err(ValidationError::for_field(
                "file",
                format!("Please select a file to upload for {}.", self.noun()),
            ));
        };

        let lower = name.to_lowercase();
        if !lower.contains(self.name_marker()) {
            return Err(ValidationError::for_field(
                "file",
                format!(
                    "Please select a file that contains '{}' in its name.",
                    self.name_marker()
                ),
            ));
        }

        if !Self::EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            return Err(ValidationError::for_field(
                "file",
                "Please select an Excel file (.xlsx or .xls).",
            ));
        }

        Ok(())
    }

    /// Acknowledgment shown after a successful upload.
    #[must_use]
    pub fn success_message(self) -> String {
        format!("File uploaded successfully for {}!", self.noun())
    }

    /// Acknowledgment shown after a failed upload.
    #[must_use]
    pub fn failure_message(self) -> String {
        format!("Failed to upload file for {}.", self.noun())
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(UploadKind::Bookings.endpoint(), "upload");
        assert_eq!(UploadKind::Cancellations.endpoint(), "uploadcancel");
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        assert!(UploadKind::Bookings.validate_file_name(Some("March_BOOKINGS.xlsx")).is_ok());
        assert!(UploadKind::Cancellations.validate_file_name(Some("Cancel-list.XLS")).is_ok());
    }

    #[test]
    fn test_wrong_marker() {
        let err = UploadKind::Bookings
            .validate_file_name(Some("cancellations.xlsx"))
            .unwrap_err();
        assert_eq!(
            err.message(),
            "Please select a file that contains 'booking' in its name."
        );
    }

    #[test]
    fn test_missing_file() {
        let err = UploadKind::Cancellations.validate_file_name(None).unwrap_err();
        assert_eq!(
            err.message(),
            "Please select a file to upload for cancellations."
        );
    }

    #[test]
    fn test_extension_required() {
        assert!(UploadKind::Bookings.validate_file_name(Some("bookings.csv")).is_err());
    }

    #[test]
    fn test_slug_round_trip() {
        for kind in UploadKind::ALL {
            assert_eq!(UploadKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(UploadKind::from_slug("other"), None);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            UploadKind::Bookings.success_message(),
            "File uploaded successfully for bookings!"
        );
        assert_eq!(
            UploadKind::Cancellations.failure_message(),
            "Failed to upload file for cancellations."
        );
    }
}
