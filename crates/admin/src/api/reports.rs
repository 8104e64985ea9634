//! Read-only income and booking reports.

use falcon_core::{
    DailyIncomeSummary, DayDetail, MonthlyQuery, MonthlySummary, PendingAmountsQuery, SlotDate,
    SportActuals,
};
use tracing::instrument;

use super::{FalconApiError, FalconClient};

impl FalconClient {
    /// Today's income broken down by sport.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn sport_actuals(&self) -> Result<SportActuals, FalconApiError> {
        self.get(self.endpoint("api/dailyreport")?).await
    }

    /// Summary and bookings for one day.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(date = %date.wire()))]
    pub async fn day_report(&self, date: SlotDate) -> Result<DayDetail, FalconApiError> {
        let mut url = self.endpoint("api/DayReport/DayReport")?;
        url.query_pairs_mut().append_pair("date", &date.wire());
        self.get(url).await
    }

    /// Daily summaries for the last seven days, in backend order.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn last_7_days(&self) -> Result<Vec<DailyIncomeSummary>, FalconApiError> {
        self.get(self.endpoint("api/dailyreport/last7days")?).await
    }

    /// Summary for one calendar month.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(month = query.month(), year = query.year()))]
    pub async fn monthly_report(
        &self,
        query: MonthlyQuery,
    ) -> Result<MonthlySummary, FalconApiError> {
        let mut url = self.endpoint("api/dailyreport/monthlyreport")?;
        url.query_pairs_mut()
            .append_pair("month", &query.month().to_string())
            .append_pair("year", &query.year().to_string());
        self.get(url).await
    }

    /// Pending amounts between two dates, as preformatted text.
    ///
    /// The backend may send the text raw or as a JSON string; both are
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(from = %query.from_date().wire(), to = %query.to_date().wire()))]
    pub async fn pending_amounts(
        &self,
        query: PendingAmountsQuery,
    ) -> Result<String, FalconApiError> {
        let mut url = self.endpoint("api/DayReport/PendingAmounts")?;
        url.query_pairs_mut()
            .append_pair("fromDate", &query.from_date().wire())
            .append_pair("toDate", &query.to_date().wire());
        let body = self.get_text(url).await?;
        Ok(unquote_json_string(body))
    }
}

/// Unwrap a body that is a JSON string literal; leave anything else as is.
fn unquote_json_string(body: String) -> String {
    if body.trim_start().starts_with('"') {
        if let Ok(text) = serde_json::from_str::<String>(&body) {
            return text;
        }
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote_json_string() {
        assert_eq!(
            unquote_json_string(r#""Ali: 100\nSara: 50""#.to_string()),
            "Ali: 100\nSara: 50"
        );
        assert_eq!(unquote_json_string("plain text".to_string()), "plain text");
        assert_eq!(unquote_json_string("\"broken".to_string()), "\"broken");
    }
}
