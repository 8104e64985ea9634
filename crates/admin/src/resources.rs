//! Backend endpoints as view resources.
//!
//! Each screen instantiates one [`RemoteView`](falcon_core::RemoteView) or
//! [`EditableView`](falcon_core::EditableView) over one of these. The
//! failure messages are the ones the operator sees in the page banner.

use falcon_core::{
    Address, ConfigEntry, DailyIncomeSummary, DayDetail, InvoiceLineItem, MonthlyQuery,
    MonthlySummary, PendingAmountsQuery, RemoteResource, SlotDate, SportActuals,
    WritableResource,
};

use crate::api::{FalconApiError, FalconClient};

/// `GET /api/config`, writable.
#[derive(Debug, Clone)]
pub struct ConfigResource {
    api: FalconClient,
}

impl ConfigResource {
    #[must_use]
    pub const fn new(api: FalconClient) -> Self {
        Self { api }
    }
}

impl RemoteResource for ConfigResource {
    type Output = Vec<ConfigEntry>;
    type Error = FalconApiError;
    const LOAD_FAILURE: &'static str = "Failed to load configuration data.";

    async fn fetch(&self) -> Result<Self::Output, Self::Error> {
        self.api.list_config().await
    }
}

impl WritableResource for ConfigResource {
    type Record = ConfigEntry;
    const SAVE_FAILURE: &'static str = "Failed to save configuration. Please check your inputs.";

    async fn create(&self, record: &ConfigEntry) -> Result<(), Self::Error> {
        self.api.create_config(record).await
    }

    async fn update(&self, record: &ConfigEntry) -> Result<(), Self::Error> {
        self.api.update_config(record).await
    }
}

/// `GET /api/address`, writable.
#[derive(Debug, Clone)]
pub struct AddressResource {
    api: FalconClient,
}

impl AddressResource {
    #[must_use]
    pub const fn new(api: FalconClient) -> Self {
        Self { api }
    }
}

impl RemoteResource for AddressResource {
    type Output = Vec<Address>;
    type Error = FalconApiError;
    const LOAD_FAILURE: &'static str = "Failed to load addresses.";

    async fn fetch(&self) -> Result<Self::Output, Self::Error> {
        self.api.list_addresses().await
    }
}

impl WritableResource for AddressResource {
    type Record = Address;
    const SAVE_FAILURE: &'static str = "Failed to save address.";

    async fn create(&self, record: &Address) -> Result<(), Self::Error> {
        self.api.create_address(record).await
    }

    async fn update(&self, record: &Address) -> Result<(), Self::Error> {
        self.api.update_address(record).await
    }
}

/// `GET /api/dailyreport`.
#[derive(Debug, Clone)]
pub struct SportActualsResource {
    api: FalconClient,
}

impl SportActualsResource {
    #[must_use]
    pub const fn new(api: FalconClient) -> Self {
        Self { api }
    }
}

impl RemoteResource for SportActualsResource {
    type Output = SportActuals;
    type Error = FalconApiError;
    const LOAD_FAILURE: &'static str = "Failed to fetch data";

    async fn fetch(&self) -> Result<Self::Output, Self::Error> {
        self.api.sport_actuals().await
    }
}

/// `GET /api/DayReport/DayReport?date=`.
#[derive(Debug, Clone)]
pub struct DayReportResource {
    api: FalconClient,
    date: SlotDate,
}

impl DayReportResource {
    #[must_use]
    pub const fn new(api: FalconClient, date: SlotDate) -> Self {
        Self { api, date }
    }
}

impl RemoteResource for DayReportResource {
    type Output = DayDetail;
    type Error = FalconApiError;
    const LOAD_FAILURE: &'static str = "Error fetching data. Please try again.";

    async fn fetch(&self) -> Result<Self::Output, Self::Error> {
        self.api.day_report(self.date).await
    }
}

/// `GET /api/dailyreport/last7days`.
#[derive(Debug, Clone)]
pub struct Last7DaysResource {
    api: FalconClient,
}

impl Last7DaysResource {
    #[must_use]
    pub const fn new(api: FalconClient) -> Self {
        Self { api }
    }
}

impl RemoteResource for Last7DaysResource {
    type Output = Vec<DailyIncomeSummary>;
    type Error = FalconApiError;
    const LOAD_FAILURE: &'static str = "Failed to fetch data. Please try again later.";

    async fn fetch(&self) -> Result<Self::Output, Self::Error> {
        self.api.last_7_days().await
    }
}

/// `GET /api/dailyreport/monthlyreport?month=&year=`.
#[derive(Debug, Clone)]
pub struct MonthlyReportResource {
    api: FalconClient,
    query: MonthlyQuery,
}

impl MonthlyReportResource {
    #[must_use]
    pub const fn new(api: FalconClient, query: MonthlyQuery) -> Self {
        Self { api, query }
    }
}

impl RemoteResource for MonthlyReportResource {
    type Output = MonthlySummary;
    type Error = FalconApiError;
    const LOAD_FAILURE: &'static str = "Failed to fetch data. Please try again later.";

    async fn fetch(&self) -> Result<Self::Output, Self::Error> {
        self.api.monthly_report(self.query).await
    }
}

/// `GET /api/DayReport/PendingAmounts?fromDate=&toDate=`.
#[derive(Debug, Clone)]
pub struct PendingAmountsResource {
    api: FalconClient,
    query: PendingAmountsQuery,
}

impl PendingAmountsResource {
    #[must_use]
    pub const fn new(api: FalconClient, query: PendingAmountsQuery) -> Self {
        Self { api, query }
    }
}

impl RemoteResource for PendingAmountsResource {
    type Output = String;
    type Error = FalconApiError;
    const LOAD_FAILURE: &'static str = "Error fetching data. Please try again.";

    async fn fetch(&self) -> Result<Self::Output, Self::Error> {
        self.api.pending_amounts(self.query).await
    }
}

/// `GET /api/InvoiceGenerateTest/search?query=`.
#[derive(Debug, Clone)]
pub struct InvoiceSearchResource {
    api: FalconClient,
    query: String,
}

impl InvoiceSearchResource {
    #[must_use]
    pub const fn new(api: FalconClient, query: String) -> Self {
        Self { api, query }
    }
}

impl RemoteResource for InvoiceSearchResource {
    type Output = Vec<InvoiceLineItem>;
    type Error = FalconApiError;
    const LOAD_FAILURE: &'static str = "Failed to search for invoices. Please try again.";

    async fn fetch(&self) -> Result<Self::Output, Self::Error> {
        self.api.search_invoices(self.query.trim()).await
    }
}
