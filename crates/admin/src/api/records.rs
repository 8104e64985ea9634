//! Configuration entries and the address book.

use falcon_core::{Address, ConfigEntry};
use reqwest::Method;
use tracing::instrument;

use super::{FalconApiError, FalconClient};

impl FalconClient {
    /// List every configuration entry.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_config(&self) -> Result<Vec<ConfigEntry>, FalconApiError> {
        self.get(self.endpoint("api/config")?).await
    }

    /// Create a configuration entry.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, entry), fields(key = %entry.key))]
    pub async fn create_config(&self, entry: &ConfigEntry) -> Result<(), FalconApiError> {
        self.send(Method::POST, self.endpoint("api/config")?, entry)
            .await
    }

    /// Update the value of the entry identified by `entry.key`.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, entry), fields(key = %entry.key))]
    pub async fn update_config(&self, entry: &ConfigEntry) -> Result<(), FalconApiError> {
        let url = self.endpoint_for("api/config", &entry.key)?;
        self.send(Method::PUT, url, entry).await
    }

    /// List every address book entry.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_addresses(&self) -> Result<Vec<Address>, FalconApiError> {
        self.get(self.endpoint("api/address")?).await
    }

    /// Create an address book entry.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, address), fields(mobile_number = %address.mobile_number))]
    pub async fn create_address(&self, address: &Address) -> Result<(), FalconApiError> {
        self.send(Method::POST, self.endpoint("api/address")?, address)
            .await
    }

    /// Update the entry identified by `address.mobile_number`.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, address), fields(mobile_number = %address.mobile_number))]
    pub async fn update_address(&self, address: &Address) -> Result<(), FalconApiError> {
        let url = self.endpoint_for("api/address", &address.mobile_number)?;
        self.send(Method::PUT, url, address).await
    }
}
