//! Invoice generation: search billable slots by mobile number, select rows,
//! download the PDF.

use askama::Template;
use axum::{
    Router,
    body::Bytes,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use falcon_core::{
    InvoiceLineItem, InvoiceRequest, LoadTrigger, RemoteView, Screen, validate_search_query,
};
use serde::Deserialize;
use tracing::instrument;

use crate::components::data_table::{DataTableConfig, invoice_table_config};
use crate::filters;
use crate::middleware::RequireSession;
use crate::resources::InvoiceSearchResource;
use crate::state::AppState;

use super::layout::{Dialog, Shell, render};

const PDF_FAILURE_MESSAGE: &str = "Failed to generate the PDF.";
const PDF_FILE_NAME: &str = "Invoice.pdf";

/// Prefix of the hidden field carrying a row's booking code.
const ROW_FIELD_PREFIX: &str = "row_";

/// One selectable result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRowView {
    pub id: String,
    pub date: String,
    pub time: String,
    pub hours: String,
    pub amount: String,
    pub booking_code: String,
}

impl From<&InvoiceLineItem> for InvoiceRowView {
    fn from(item: &InvoiceLineItem) -> Self {
        Self {
            id: item.id.clone(),
            date: item.slotdate.clone(),
            time: item.slottime.clone(),
            hours: item.slothours.to_string(),
            amount: item.slotamount.fixed2(),
            booking_code: item.bookingcode.clone(),
        }
    }
}

/// Invoice page template.
#[derive(Template)]
#[template(path = "invoice.html")]
struct InvoiceTemplate {
    shell: Shell,
    query: String,
    table: DataTableConfig,
    rows: Vec<InvoiceRowView>,
    show_table: bool,
    dialog: Option<Dialog>,
}

impl InvoiceTemplate {
    fn new(query: &str) -> Self {
        Self {
            shell: Shell::new(Screen::GenerateInvoice, true),
            query: query.to_owned(),
            table: invoice_table_config(),
            rows: vec![],
            show_table: false,
            dialog: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// Build the invoice router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/invoicegenerate", get(invoice_page))
        .route("/invoicegenerate/pdf", post(generate_pdf))
}

/// GET /invoicegenerate?query=
#[instrument(skip(state, _gate))]
async fn invoice_page(
    State(state): State<AppState>,
    RequireSession(_gate): RequireSession,
    Query(params): Query<SearchParams>,
) -> Response {
    let Some(query) = params.query else {
        return render(&InvoiceTemplate::new(""));
    };
    let mut template = InvoiceTemplate::new(query.trim());

    if let Err(e) = validate_search_query(&query) {
        template.shell = template.shell.with_banner(e.message());
        return render(&template);
    }

    let mut view = RemoteView::new(InvoiceSearchResource::new(state.api().clone(), query));
    view.load(LoadTrigger::UserAction).await;
    template.shell = template.shell.with_error(view.error());
    if let Some(items) = view.data() {
        template.rows = items.iter().map(InvoiceRowView::from).collect();
        template.show_table = true;
    }

    render(&template)
}

/// The PDF form as submitted: the search query, every listed row and the
/// ids of the checked rows.
#[derive(Debug, Default, PartialEq, Eq)]
struct PdfSelection {
    query: String,
    items: Vec<InvoiceLineItem>,
    selected: Vec<String>,
}

impl PdfSelection {
    /// Parse the urlencoded body. `selected` repeats once per checked row.
    fn parse(body: &[u8]) -> Self {
        let mut selection = Self::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            if key == "query" {
                selection.query = value.trim().to_owned();
            } else if key == "selected" {
                selection.selected.push(value.into_owned());
            } else if let Some(id) = key.strip_prefix(ROW_FIELD_PREFIX) {
                selection.items.push(InvoiceLineItem {
                    id: id.to_owned(),
                    bookingcode: value.into_owned(),
                    ..InvoiceLineItem::default()
                });
            }
        }
        selection
    }
}

fn search_href(query: &str) -> String {
    format!(
        "{}?query={}",
        Screen::GenerateInvoice.path(),
        urlencoding::encode(query)
    )
}

fn pdf_response(bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{PDF_FILE_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// POST /invoicegenerate/pdf
#[instrument(skip(state, _gate, body))]
async fn generate_pdf(
    State(state): State<AppState>,
    RequireSession(_gate): RequireSession,
    body: Bytes,
) -> Response {
    let selection = PdfSelection::parse(&body);
    let back = search_href(&selection.query);

    let request = match InvoiceRequest::from_selection(
        &selection.query,
        &selection.items,
        &selection.selected,
    ) {
        Ok(request) => request,
        Err(e) => {
            let mut template = InvoiceTemplate::new(&selection.query);
            template.dialog = Some(Dialog::new(e.message(), back));
            return render(&template);
        }
    };

    match state.api().generate_invoice_pdf(&request).await {
        Ok(bytes) => {
            tracing::info!(records = %request.records, size = bytes.len(), "Invoice generated");
            pdf_response(bytes)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Invoice generation failed");
            let mut template = InvoiceTemplate::new(&selection.query);
            template.dialog = Some(Dialog::new(PDF_FAILURE_MESSAGE, back));
            render(&template)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_row_order_and_selection() {
        let body = b"query=+55501234+&row_7=BK-7&selected=9&row_9=BK-9&selected=7";
        let selection = PdfSelection::parse(body);

        assert_eq!(selection.query, "55501234");
        assert_eq!(selection.items.len(), 2);
        assert_eq!(selection.items[0].bookingcode, "BK-7");
        assert_eq!(selection.selected, ["9", "7"]);

        let request = InvoiceRequest::from_selection(
            &selection.query,
            &selection.items,
            &selection.selected,
        )
        .unwrap();
        assert_eq!(request.records, "BK-7,BK-9");
        assert_eq!(request.mobilenumber, "55501234");
    }

    #[test]
    fn test_parse_without_selection_is_rejected() {
        let selection = PdfSelection::parse(b"query=55501234&row_1=BK-1");
        assert!(
            InvoiceRequest::from_selection(&selection.query, &selection.items, &selection.selected)
                .is_err()
        );
    }

    #[test]
    fn test_pdf_response_headers() {
        let response = pdf_response(b"%PDF-1.4".to_vec());
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Invoice.pdf\""
        );
    }

    #[test]
    fn test_search_href_encodes_query() {
        assert_eq!(search_href("+974 555"), "/invoicegenerate?query=%2B974%20555");
    }
}
