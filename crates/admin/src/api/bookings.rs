//! Spreadsheet uploads, invoices and login.

use falcon_core::{InvoiceLineItem, InvoiceRequest, LoginCredentials, UploadKind};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::instrument;

use super::{FalconApiError, FalconClient};

/// MIME type sent with uploaded spreadsheets.
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const XLS_MIME: &str = "application/vnd.ms-excel";

impl FalconClient {
    /// Upload a bookings or cancellations spreadsheet.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, contents), fields(kind = %kind, size = contents.len()))]
    pub async fn upload_spreadsheet(
        &self,
        kind: UploadKind,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<(), FalconApiError> {
        let mime = if file_name.to_lowercase().ends_with(".xls") {
            XLS_MIME
        } else {
            XLSX_MIME
        };
        let part = Part::bytes(contents)
            .file_name(file_name.to_owned())
            .mime_str(mime)?;
        let form = Form::new().part("file", part);

        let url = self.endpoint(&format!("api/upload/{}", kind.endpoint()))?;
        self.post_multipart(url, form).await
    }

    /// Billable slots matching a customer mobile number.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn search_invoices(
        &self,
        query: &str,
    ) -> Result<Vec<InvoiceLineItem>, FalconApiError> {
        let mut url = self.endpoint("api/InvoiceGenerateTest/search")?;
        url.query_pairs_mut().append_pair("query", query);
        self.get(url).await
    }

    /// Render an invoice PDF for the selected bookings.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, request), fields(records = %request.records))]
    pub async fn generate_invoice_pdf(
        &self,
        request: &InvoiceRequest,
    ) -> Result<Vec<u8>, FalconApiError> {
        let url = self.endpoint("api/InvoiceGenerateTest/generatepdf")?;
        self.post_for_bytes(url, request).await
    }

    /// Check credentials with the backend. Any 2xx answer is a success.
    ///
    /// # Errors
    ///
    /// Returns error if the credentials are rejected or the request fails.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<(), FalconApiError> {
        self.send(Method::POST, self.endpoint("api/auth/login")?, credentials)
            .await
    }
}
