//! Records exchanged with the Falcon backend.
//!
//! Every record here is owned by the backend. The client fetches, displays
//! and round-trips them unchanged; the only local logic is required-field
//! validation and a few display-only derived values.

pub mod address;
pub mod amount;
pub mod config_entry;
pub mod credential;
pub mod invoice;
pub mod report;
pub mod slot_date;
pub mod upload;

pub use address::Address;
pub use amount::Amount;
pub use config_entry::ConfigEntry;
pub use credential::LoginCredentials;
pub use invoice::{InvoiceLineItem, InvoiceRequest, validate_search_query};
pub use report::{
    BookingData, DailyIncomeSummary, DayDetail, IncomeFigures, MonthlyQuery, MonthlySummary,
    PendingAmountsQuery, SportActuals, SportNetSum,
};
pub use slot_date::SlotDate;
pub use upload::UploadKind;
