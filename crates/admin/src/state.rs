//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::{FalconApiError, FalconClient};
use crate::config::AdminConfig;

/// Application state shared across all handlers.
///
/// Holds no per-operator data: every screen builds its own view state from
/// a fresh backend call.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: FalconClient,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the backend HTTP client fails to build.
    pub fn new(config: AdminConfig) -> Result<Self, FalconApiError> {
        let api = FalconClient::new(&config.api)?;
        Ok(Self {
            inner: Arc::new(AppStateInner { config, api }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Backend client.
    #[must_use]
    pub fn api(&self) -> &FalconClient {
        &self.inner.api
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("api", &self.inner.api)
            .finish_non_exhaustive()
    }
}
