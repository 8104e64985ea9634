//! Income and booking reports.
//!
//! Report records are read-only aggregates computed by the backend. A few
//! screens derive display values locally (see [`IncomeFigures`]); those
//! values are never sent back.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::slot_date::SlotDate;
use crate::validation::ValidationError;

/// Sport income figures shared by the daily and monthly summaries.
///
/// Tables show the figures as reported ([`Self::reported_total_or_zero`]).
/// The day summary alone recomputes a zero or missing total or profit from
/// its components ([`Self::display_total`]). Zero and "missing" are
/// indistinguishable there: a genuine zero total with non-zero components
/// is displayed as the sum of the components.
pub trait IncomeFigures {
    /// Football income.
    fn football_sum(&self) -> Amount;
    /// Badminton income.
    fn badminton_sum(&self) -> Amount;
    /// Total as reported by the backend, if present.
    fn reported_total(&self) -> Option<Amount>;
    /// Income target for the period.
    fn target(&self) -> Amount;
    /// Profit as reported by the backend, if present.
    fn reported_profit(&self) -> Option<Amount>;

    /// The reported total, zero when absent.
    fn reported_total_or_zero(&self) -> Amount {
        self.reported_total().unwrap_or_default()
    }

    /// The reported profit, zero when absent.
    fn reported_profit_or_zero(&self) -> Amount {
        self.reported_profit().unwrap_or_default()
    }

    /// Total to display: the reported total, or football + badminton.
    fn display_total(&self) -> Amount {
        match self.reported_total() {
            Some(total) if !total.is_zero() => total,
            _ => self.football_sum() + self.badminton_sum(),
        }
    }

    /// Profit to display: the reported profit, or football + badminton - target.
    fn display_profit(&self) -> Amount {
        match self.reported_profit() {
            Some(profit) if !profit.is_zero() => profit,
            _ => self.football_sum() + self.badminton_sum() - self.target(),
        }
    }
}

/// Income summary for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyIncomeSummary {
    pub slot_date: SlotDate,
    #[serde(default)]
    pub football_sum: Amount,
    #[serde(default)]
    pub badminton_sum: Amount,
    #[serde(default)]
    pub total_sum: Option<Amount>,
    #[serde(default)]
    pub day_target: Amount,
    #[serde(default)]
    pub profit: Option<Amount>,
}

impl IncomeFigures for DailyIncomeSummary {
    fn football_sum(&self) -> Amount {
        self.football_sum
    }

    fn badminton_sum(&self) -> Amount {
        self.badminton_sum
    }

    fn reported_total(&self) -> Option<Amount> {
        self.total_sum
    }

    fn target(&self) -> Amount {
        self.day_target
    }

    fn reported_profit(&self) -> Option<Amount> {
        self.profit
    }
}

impl DailyIncomeSummary {
    /// Plain-text summary for sharing to a messaging app.
    #[must_use]
    pub fn share_text(&self) -> String {
        format!(
            "Daily Income Summary:\n\
             Slot Date: {}\n\
             Football Sum: {}\n\
             Badminton Sum: {}\n\
             Total Sum: {}\n\
             Day Target: {}\n\
             Profit: {}",
            self.slot_date.short_display(),
            self.football_sum,
            self.badminton_sum,
            self.display_total(),
            self.day_target,
            self.display_profit(),
        )
    }
}

/// One booking row from the day report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingData {
    #[serde(default)]
    pub timestamp: Option<String>,
    pub slot_date: SlotDate,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub booking_id: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub sport_name: String,
    #[serde(default)]
    pub court: String,
    #[serde(default, rename = "type")]
    pub booking_type: String,
    #[serde(default)]
    pub gross: Amount,
    #[serde(default)]
    pub discount: Amount,
    #[serde(default)]
    pub net: Amount,
    #[serde(default)]
    pub paid: Amount,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_mobile: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub handler: String,
}

impl BookingData {
    /// Returns `true` when the amount paid differs from the net amount due.
    #[must_use]
    pub fn has_outstanding_balance(&self) -> bool {
        self.net != self.paid
    }
}

/// Response of the day report endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayDetail {
    #[serde(default)]
    pub daily_income_summary: Option<DailyIncomeSummary>,
    #[serde(default)]
    pub booking_datas: Option<Vec<BookingData>>,
}

impl DayDetail {
    /// Message shown when the response carries no booking list.
    pub const NO_DATA_MESSAGE: &'static str = "No data fetched";

    /// Returns `true` if the backend answered without a booking list.
    #[must_use]
    pub const fn is_empty_response(&self) -> bool {
        self.booking_datas.is_none()
    }
}

/// Income summary for a calendar month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    #[serde(default)]
    pub football_sum: Amount,
    #[serde(default)]
    pub badminton_sum: Amount,
    #[serde(default)]
    pub total_sum: Option<Amount>,
    #[serde(default)]
    pub day_target: Amount,
    #[serde(default)]
    pub profit: Option<Amount>,
}

impl IncomeFigures for MonthlySummary {
    fn football_sum(&self) -> Amount {
        self.football_sum
    }

    fn badminton_sum(&self) -> Amount {
        self.badminton_sum
    }

    fn reported_total(&self) -> Option<Amount> {
        self.total_sum
    }

    fn target(&self) -> Amount {
        self.day_target
    }

    fn reported_profit(&self) -> Option<Amount> {
        self.profit
    }
}

/// Net income of one sport on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportNetSum {
    #[serde(default)]
    pub sport_name: String,
    #[serde(default)]
    pub net_sum: Amount,
    #[serde(default)]
    pub date_value: String,
}

/// "Actual by sport" summary for the current day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportActuals {
    #[serde(default)]
    pub net_sums: Vec<SportNetSum>,
    #[serde(default)]
    pub daily_target: Amount,
    #[serde(default)]
    pub day_sum: Amount,
    #[serde(default, rename = "dayprofit")]
    pub day_profit: Amount,
}

/// Month and year selection for the monthly report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyQuery {
    month: u32,
    year: i32,
}

impl MonthlyQuery {
    /// Month labels in selector order.
    pub const MONTH_LABELS: [&'static str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];

    /// First year offered by the year selector.
    pub const FIRST_YEAR: i32 = 2024;

    /// Create a query for a month (1-12) and year.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the month is out of range.
    pub fn new(month: u32, year: i32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::for_field(
                "month",
                "Please select a month between JAN and DEC.",
            ));
        }
        Ok(Self { month, year })
    }

    /// The month containing `today`.
    #[must_use]
    pub fn containing(today: NaiveDate) -> Self {
        Self {
            month: today.month(),
            year: today.year(),
        }
    }

    /// Month number (1-12).
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Four-digit year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Years offered by the selector, from [`Self::FIRST_YEAR`] to `current_year`.
    #[must_use]
    pub fn selectable_years(current_year: i32) -> Vec<i32> {
        (Self::FIRST_YEAR..=current_year.max(Self::FIRST_YEAR)).collect()
    }
}

/// Date window for the pending amounts report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAmountsQuery {
    from: SlotDate,
    to: SlotDate,
}

impl PendingAmountsQuery {
    /// Days covered by the default window.
    pub const DEFAULT_WINDOW_DAYS: i64 = 30;

    /// Create a window from two dates.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `from` is after `to`.
    pub fn new(from: SlotDate, to: SlotDate) -> Result<Self, ValidationError> {
        if from > to {
            return Err(ValidationError::for_field(
                "from_date",
                "From date must not be after To date.",
            ));
        }
        Ok(Self { from, to })
    }

    /// The 30 days ending on `today`.
    #[must_use]
    pub fn ending(today: NaiveDate) -> Self {
        Self {
            from: SlotDate::new(today - Duration::days(Self::DEFAULT_WINDOW_DAYS)),
            to: SlotDate::new(today),
        }
    }

    /// First day of the window.
    #[must_use]
    pub const fn from_date(&self) -> SlotDate {
        self.from
    }

    /// Last day of the window.
    #[must_use]
    pub const fn to_date(&self) -> SlotDate {
        self.to
    }
}
