//! Falcon backend REST client.
//!
//! Every screen of the admin panel is backed by one of these calls. The
//! client does not classify failures: a transport error and any non-2xx
//! status are both returned as a [`FalconApiError`], logged by the caller
//! and shown to the operator as a generic message.
//!
//! # API Reference
//!
//! - Base URL: `FALCON_API_BASE_URL` (see [`crate::config::FalconApiConfig`])
//! - Authentication: none at the HTTP level; the backend authorizes requests itself
//! - Bodies: JSON with camelCase field names, except uploads (multipart) and
//!   the invoice endpoints (lowercase names)

mod bookings;
mod records;
mod reports;

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::FalconApiConfig;

/// Longest response body kept in an error message.
const MAX_ERROR_BODY: usize = 512;

/// Errors that can occur when calling the Falcon backend.
#[derive(Debug, Error)]
pub enum FalconApiError {
    /// Request could not be sent, timed out, or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response or request URL could not be built or parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Falcon backend client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct FalconClient {
    inner: Arc<FalconClientInner>,
}

struct FalconClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl FalconClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &FalconApiConfig) -> Result<Self, FalconApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("falcon-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(FalconClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Resolve a path relative to the backend root.
    fn endpoint(&self, path: &str) -> Result<Url, FalconApiError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| FalconApiError::Parse(format!("Invalid endpoint {path}: {e}")))
    }

    /// Resolve a path and append one percent-encoded segment (a record key).
    fn endpoint_for(&self, path: &str, key: &str) -> Result<Url, FalconApiError> {
        let mut url = self.endpoint(path)?;
        url.path_segments_mut()
            .map_err(|()| FalconApiError::Parse(format!("Cannot extend endpoint {path}")))?
            .push(key);
        Ok(url)
    }

    /// Execute a GET request and parse the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, FalconApiError> {
        let response = self.inner.client.get(url).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a GET request and return the body as text.
    pub(crate) async fn get_text(&self, url: Url) -> Result<String, FalconApiError> {
        let response = self.inner.client.get(url).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.text().await?)
    }

    /// Send a JSON body, ignoring whatever the backend answers on success.
    pub(crate) async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<(), FalconApiError> {
        let response = self.inner.client.request(method, url).json(body).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// POST a JSON body and return the raw response bytes.
    pub(crate) async fn post_for_bytes<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<Vec<u8>, FalconApiError> {
        let response = self.inner.client.post(url).json(body).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// POST a multipart form.
    pub(crate) async fn post_multipart(
        &self,
        url: Url,
        form: reqwest::multipart::Form,
    ) -> Result<(), FalconApiError> {
        let response = self.inner.client.post(url).multipart(form).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, FalconApiError> {
        let response = Self::ensure_success(response).await?;
        response
            .json()
            .await
            .map_err(|e| FalconApiError::Parse(format!("Failed to parse response: {e}")))
    }

    /// Turn any non-2xx status into an error carrying the body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, FalconApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let mut message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        if message.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !message.is_char_boundary(cut) {
                cut -= 1;
            }
            message.truncate(cut);
        }

        Err(FalconApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl std::fmt::Debug for FalconClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FalconClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
