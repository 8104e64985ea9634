//! Invoice generation and spreadsheet uploads against the fake backend.

#![allow(clippy::unwrap_used)]

use falcon_integration_tests::{TestContext, row_count};
use reqwest::multipart::{Form, Part};
use reqwest::{StatusCode, header};
use serde_json::json;

fn seed_invoice_items(ctx: &TestContext) {
    ctx.backend.set_invoice_items(json!([
        {"id": 7, "slotdate": "2025-01-06", "slottime": "18:00", "slothours": 1,
         "slotamount": 200, "bookingcode": "BK7"},
        {"id": "9", "slotdate": "2025-01-08", "slottime": "19:00", "slothours": 1.5,
         "slotamount": 300, "bookingcode": "BK9"}
    ]));
}

async fn upload(ctx: &TestContext, kind: &str, file_name: &str) -> String {
    let part = Part::bytes(b"PK fake workbook".to_vec()).file_name(file_name.to_owned());
    let form = Form::new().text("kind", kind.to_owned()).part("file", part);
    let response = ctx
        .client
        .post(ctx.url("/uploadpage"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.text().await.unwrap()
}

#[tokio::test]
async fn test_blank_invoice_search_makes_no_call() {
    let ctx = TestContext::logged_in().await;
    let html = ctx.page("/invoicegenerate?query=%20%20").await;

    assert!(html.contains("Please enter a search query before clicking the search button."));
    assert!(ctx.backend.requests().is_empty());
}

#[tokio::test]
async fn test_invoice_search_lists_rows() {
    let ctx = TestContext::logged_in().await;
    seed_invoice_items(&ctx);
    let html = ctx.page("/invoicegenerate?query=55501234").await;

    assert_eq!(row_count(&html), 2);
    assert!(html.contains("name=\"row_7\" value=\"BK7\""));
    assert!(html.contains("name=\"selected\" value=\"9\""));
    assert!(html.contains("name=\"query\" value=\"55501234\""));
    assert_eq!(ctx.backend.requests(), ["GET /api/InvoiceGenerateTest/search"]);
}

#[tokio::test]
async fn test_generate_pdf_downloads_invoice() {
    let ctx = TestContext::logged_in().await;
    let response = ctx
        .client
        .post(ctx.url("/invoicegenerate/pdf"))
        .form(&[
            ("query", "55501234"),
            ("row_7", "BK7"),
            ("row_9", "BK9"),
            ("selected", "9"),
            ("selected", "7"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Invoice.pdf\""
    );
    let body = response.bytes().await.unwrap();
    assert!(body.starts_with(b"%PDF"));
    assert_eq!(
        ctx.backend.last_pdf_request(),
        Some(json!({"records": "BK7,BK9", "mobilenumber": "55501234"}))
    );
}

#[tokio::test]
async fn test_generate_pdf_requires_selection() {
    let ctx = TestContext::logged_in().await;
    let html = ctx
        .submit(
            "/invoicegenerate/pdf",
            &[("query", "55501234"), ("row_7", "BK7")],
        )
        .await;

    assert!(html.contains("Please select at least one row to generate the PDF."));
    assert!(html.contains("<dialog open"));
    assert!(html.contains("href=\"/invoicegenerate?query=55501234\""));
    assert!(ctx.backend.requests().is_empty());
}

#[tokio::test]
async fn test_generate_pdf_failure_shows_dialog() {
    let ctx = TestContext::logged_in().await;
    ctx.backend.fail_writes(true);
    let html = ctx
        .submit(
            "/invoicegenerate/pdf",
            &[("query", "55501234"), ("row_7", "BK7"), ("selected", "7")],
        )
        .await;

    assert!(html.contains("Failed to generate the PDF."));
}

#[tokio::test]
async fn test_upload_rejects_misnamed_file_without_calling() {
    let ctx = TestContext::logged_in().await;
    let html = upload(&ctx, "booking", "january.xlsx").await;

    assert!(html.contains("<dialog open"));
    assert!(ctx.backend.requests().is_empty());
}

#[tokio::test]
async fn test_upload_rejects_non_spreadsheet() {
    let ctx = TestContext::logged_in().await;
    let html = upload(&ctx, "booking", "booking-jan.csv").await;

    assert!(html.contains("Please select an Excel file (.xlsx or .xls)."));
    assert!(ctx.backend.requests().is_empty());
}

#[tokio::test]
async fn test_upload_bookings() {
    let ctx = TestContext::logged_in().await;
    let html = upload(&ctx, "booking", "Booking-Jan.xlsx").await;

    assert!(html.contains("File uploaded successfully for bookings!"));
    assert!(html.contains("href=\"/uploadpage\""));
    assert_eq!(ctx.backend.requests(), ["POST /api/upload/upload"]);
    assert_eq!(ctx.backend.uploaded_files(), ["Booking-Jan.xlsx"]);
}

#[tokio::test]
async fn test_upload_cancellations_failure() {
    let ctx = TestContext::logged_in().await;
    ctx.backend.fail_writes(true);
    let html = upload(&ctx, "cancel", "cancel-jan.xls").await;

    assert!(html.contains("Failed to upload file for cancellations."));
    assert_eq!(ctx.backend.requests(), ["POST /api/upload/uploadcancel"]);
}
