//! End-to-end harness for the Falcon Sports admin panel.
//!
//! Each test starts two servers on ephemeral ports: a [`FakeBackend`]
//! standing in for the Falcon REST API, and the real admin app pointed at
//! it. The fake records every request it receives so tests can assert how
//! many backend calls a screen made.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p falcon-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Multipart, Path, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use falcon_admin::config::AdminConfig;
use falcon_admin::state::AppState;
use serde_json::{Value, json};

/// Username the fake backend accepts.
pub const ADMIN_USERNAME: &str = "admin";
/// Password the fake backend accepts.
pub const ADMIN_PASSWORD: &str = "secret";

/// Canned data and switches shared by the fake backend handlers.
#[derive(Debug)]
pub struct BackendData {
    pub config: Mutex<Vec<Value>>,
    pub addresses: Mutex<Vec<Value>>,
    pub day_report: Mutex<Value>,
    pub last7: Mutex<Value>,
    pub monthly: Mutex<Value>,
    pub actuals: Mutex<Value>,
    pub pending: Mutex<String>,
    pub invoice_items: Mutex<Value>,
    /// Answer every GET with a 500.
    pub fail_reads: AtomicBool,
    /// Answer every write with a 500.
    pub fail_writes: AtomicBool,
    /// `METHOD /path` for each request, in arrival order.
    pub requests: Mutex<Vec<String>>,
    pub last_pdf_request: Mutex<Option<Value>>,
    pub uploaded_files: Mutex<Vec<String>>,
}

impl Default for BackendData {
    fn default() -> Self {
        Self {
            config: Mutex::new(vec![]),
            addresses: Mutex::new(vec![]),
            day_report: Mutex::new(json!({})),
            last7: Mutex::new(json!([])),
            monthly: Mutex::new(json!({})),
            actuals: Mutex::new(json!({"netSums": [], "dailyTarget": 0, "daySum": 0, "dayprofit": 0})),
            pending: Mutex::new(String::new()),
            invoice_items: Mutex::new(json!([])),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            requests: Mutex::new(vec![]),
            last_pdf_request: Mutex::new(None),
            uploaded_files: Mutex::new(vec![]),
        }
    }
}

/// A running fake of the Falcon backend.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    pub url: String,
    pub data: Arc<BackendData>,
}

impl FakeBackend {
    /// Start the fake on an ephemeral port.
    pub async fn start() -> Self {
        let data = Arc::new(BackendData::default());
        let url = serve(backend_router(Arc::clone(&data))).await;
        Self { url, data }
    }

    pub fn set_config(&self, entries: Value) {
        *self.data.config.lock().unwrap() = as_list(entries);
    }

    pub fn set_addresses(&self, addresses: Value) {
        *self.data.addresses.lock().unwrap() = as_list(addresses);
    }

    pub fn set_day_report(&self, detail: Value) {
        *self.data.day_report.lock().unwrap() = detail;
    }

    pub fn set_last7(&self, days: Value) {
        *self.data.last7.lock().unwrap() = days;
    }

    pub fn set_monthly(&self, summary: Value) {
        *self.data.monthly.lock().unwrap() = summary;
    }

    pub fn set_actuals(&self, actuals: Value) {
        *self.data.actuals.lock().unwrap() = actuals;
    }

    pub fn set_pending(&self, text: &str) {
        *self.data.pending.lock().unwrap() = text.to_owned();
    }

    pub fn set_invoice_items(&self, items: Value) {
        *self.data.invoice_items.lock().unwrap() = items;
    }

    pub fn fail_reads(&self, fail: bool) {
        self.data.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.data.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Requests received so far, as `METHOD /path`.
    pub fn requests(&self) -> Vec<String> {
        self.data.requests.lock().unwrap().clone()
    }

    /// Requests received so far whose line starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|line| line.starts_with(prefix))
            .count()
    }

    pub fn clear_requests(&self) {
        self.data.requests.lock().unwrap().clear();
    }

    pub fn last_pdf_request(&self) -> Option<Value> {
        self.data.last_pdf_request.lock().unwrap().clone()
    }

    pub fn uploaded_files(&self) -> Vec<String> {
        self.data.uploaded_files.lock().unwrap().clone()
    }
}

fn as_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

// =============================================================================
// Fake backend routes
// =============================================================================

type Shared = Arc<BackendData>;

fn backend_router(data: Shared) -> Router {
    Router::new()
        .route("/api/config", get(list_config).post(create_config))
        .route("/api/config/{key}", put(update_config))
        .route("/api/address", get(list_addresses).post(create_address))
        .route("/api/address/{mobile}", put(update_address))
        .route("/api/DayReport/DayReport", get(day_report))
        .route("/api/DayReport/PendingAmounts", get(pending_amounts))
        .route("/api/dailyreport", get(actuals))
        .route("/api/dailyreport/last7days", get(last7))
        .route("/api/dailyreport/monthlyreport", get(monthly))
        .route("/api/upload/{endpoint}", post(upload))
        .route("/api/InvoiceGenerateTest/search", get(search_invoices))
        .route("/api/InvoiceGenerateTest/generatepdf", post(generate_pdf))
        .route("/api/auth/login", post(login))
        .layer(middleware::from_fn_with_state(Arc::clone(&data), record_request))
        .with_state(data)
}

async fn record_request(State(data): State<Shared>, request: Request, next: Next) -> Response {
    data.requests
        .lock()
        .unwrap()
        .push(format!("{} {}", request.method(), request.uri().path()));
    next.run(request).await
}

fn unavailable() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "backend unavailable").into_response()
}

fn read_json(data: &BackendData, value: &Mutex<Value>) -> Response {
    if data.fail_reads.load(Ordering::SeqCst) {
        return unavailable();
    }
    Json(value.lock().unwrap().clone()).into_response()
}

fn read_list(data: &BackendData, list: &Mutex<Vec<Value>>) -> Response {
    if data.fail_reads.load(Ordering::SeqCst) {
        return unavailable();
    }
    Json(list.lock().unwrap().clone()).into_response()
}

/// Insert `record`, replacing an entry with the same `field` value.
fn write_record(data: &BackendData, list: &Mutex<Vec<Value>>, field: &str, record: Value) -> Response {
    if data.fail_writes.load(Ordering::SeqCst) {
        return unavailable();
    }
    let mut list = list.lock().unwrap();
    match list.iter_mut().find(|entry| entry[field] == record[field]) {
        Some(existing) => *existing = record,
        None => list.push(record),
    }
    StatusCode::OK.into_response()
}

async fn list_config(State(data): State<Shared>) -> Response {
    read_list(&data, &data.config)
}

async fn create_config(State(data): State<Shared>, Json(entry): Json<Value>) -> Response {
    write_record(&data, &data.config, "key", entry)
}

async fn update_config(
    State(data): State<Shared>,
    Path(_key): Path<String>,
    Json(entry): Json<Value>,
) -> Response {
    write_record(&data, &data.config, "key", entry)
}

async fn list_addresses(State(data): State<Shared>) -> Response {
    read_list(&data, &data.addresses)
}

async fn create_address(State(data): State<Shared>, Json(address): Json<Value>) -> Response {
    write_record(&data, &data.addresses, "mobileNumber", address)
}

async fn update_address(
    State(data): State<Shared>,
    Path(_mobile): Path<String>,
    Json(address): Json<Value>,
) -> Response {
    write_record(&data, &data.addresses, "mobileNumber", address)
}

async fn day_report(State(data): State<Shared>) -> Response {
    read_json(&data, &data.day_report)
}

async fn pending_amounts(State(data): State<Shared>) -> Response {
    if data.fail_reads.load(Ordering::SeqCst) {
        return unavailable();
    }
    // The real endpoint answers with a JSON string.
    Json(data.pending.lock().unwrap().clone()).into_response()
}

async fn actuals(State(data): State<Shared>) -> Response {
    read_json(&data, &data.actuals)
}

async fn last7(State(data): State<Shared>) -> Response {
    read_json(&data, &data.last7)
}

async fn monthly(State(data): State<Shared>) -> Response {
    read_json(&data, &data.monthly)
}

async fn search_invoices(State(data): State<Shared>) -> Response {
    read_json(&data, &data.invoice_items)
}

async fn upload(
    State(data): State<Shared>,
    Path(_endpoint): Path<String>,
    mut multipart: Multipart,
) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or_default().to_owned();
            data.uploaded_files.lock().unwrap().push(name);
        }
    }
    if data.fail_writes.load(Ordering::SeqCst) {
        return unavailable();
    }
    StatusCode::OK.into_response()
}

async fn generate_pdf(State(data): State<Shared>, Json(request): Json<Value>) -> Response {
    *data.last_pdf_request.lock().unwrap() = Some(request);
    if data.fail_writes.load(Ordering::SeqCst) {
        return unavailable();
    }
    (
        [(header::CONTENT_TYPE, "application/pdf")],
        b"%PDF-1.4 fake invoice".to_vec(),
    )
        .into_response()
}

async fn login(Json(credentials): Json<Value>) -> StatusCode {
    if credentials["username"] == ADMIN_USERNAME && credentials["password"] == ADMIN_PASSWORD {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    }
}

// =============================================================================
// Test context
// =============================================================================

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    format!("http://{addr}")
}

/// A running admin app, its fake backend and a cookie-keeping client.
pub struct TestContext {
    pub client: reqwest::Client,
    pub admin_url: String,
    pub backend: FakeBackend,
}

impl TestContext {
    pub async fn new() -> Self {
        let backend = FakeBackend::start().await;
        let config = AdminConfig::local(&backend.url).expect("admin config");
        let state = AppState::new(config).expect("admin state");
        let admin_url = serve(falcon_admin::app(state)).await;

        // Redirects are asserted, not followed.
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("client");

        Self {
            client,
            admin_url,
            backend,
        }
    }

    /// Start and log in, with the login call cleared from the request log.
    pub async fn logged_in() -> Self {
        let ctx = Self::new().await;
        let response = ctx.login(ADMIN_PASSWORD, "/dashboard").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        ctx.backend.clear_requests();
        ctx
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.admin_url)
    }

    /// Submit the login form.
    pub async fn login(&self, password: &str, next: &str) -> reqwest::Response {
        self.client
            .post(self.url("/login"))
            .form(&[
                ("username", ADMIN_USERNAME),
                ("password", password),
                ("next", next),
            ])
            .send()
            .await
            .expect("login request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request")
    }

    /// GET a page and return its HTML, asserting a 200.
    pub async fn page(&self, path: &str) -> String {
        let response = self.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {path}");
        response.text().await.expect("page body")
    }

    /// POST a urlencoded form and return the HTML, asserting a 200.
    pub async fn submit(&self, path: &str, form: &[(&str, &str)]) -> String {
        let response = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request");
        assert_eq!(response.status(), StatusCode::OK, "POST {path}");
        response.text().await.expect("page body")
    }
}

/// Number of data rows rendered in `html`.
#[must_use]
pub fn row_count(html: &str) -> usize {
    html.matches("<tr class=\"data-row").count()
}

/// Whether `html` shows the error banner.
#[must_use]
pub fn has_error_banner(html: &str) -> bool {
    html.contains("class=\"banner error\"")
}
