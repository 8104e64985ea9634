//! Data table component types.
//!
//! Screens describe their columns with a [`DataTableConfig`] and hand the
//! template preformatted [`TableRow`]s, one per record, in backend order.
//! `templates/partials/data_table.html` renders both.

/// Column definition for a data table.
#[derive(Debug, Clone)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Right-align the column (amounts).
    pub numeric: bool,
}

impl TableColumn {
    /// Create a left-aligned text column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            numeric: false,
        }
    }

    /// Create a right-aligned amount column.
    #[must_use]
    pub fn numeric(key: &str, label: &str) -> Self {
        Self {
            numeric: true,
            ..Self::new(key, label)
        }
    }
}

/// One rendered cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCell {
    pub text: String,
    /// CSS class, empty for none.
    pub class: &'static str,
    /// Render the text as a link to this URL.
    pub link: Option<String>,
}

impl TableCell {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// A right-aligned amount cell.
    #[must_use]
    pub fn amount(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: "num",
            link: None,
        }
    }

    /// An amount cell marked `positive` or `negative`.
    #[must_use]
    pub fn signed(text: impl Into<String>, negative: bool) -> Self {
        Self {
            text: text.into(),
            class: if negative { "negative" } else { "positive" },
            link: None,
        }
    }

    /// A link cell (row actions).
    #[must_use]
    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: "action",
            link: Some(href.into()),
        }
    }
}

/// One rendered row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    /// CSS class, empty for none.
    pub class: &'static str,
    pub cells: Vec<TableCell>,
}

impl TableRow {
    #[must_use]
    pub const fn new(cells: Vec<TableCell>) -> Self {
        Self { class: "", cells }
    }

    /// Set the row CSS class.
    #[must_use]
    pub const fn with_class(mut self, class: &'static str) -> Self {
        self.class = class;
        self
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Column keys in display order.
    #[must_use]
    pub fn column_keys(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.key.as_str()).collect()
    }
}

/// Configuration manager table.
#[must_use]
pub fn config_table_config() -> DataTableConfig {
    DataTableConfig::new("config")
        .column(TableColumn::new("key", "Key"))
        .column(TableColumn::new("actions", "Actions"))
        .column(TableColumn::new("value", "Value"))
}

/// Address book table.
#[must_use]
pub fn address_table_config() -> DataTableConfig {
    DataTableConfig::new("addresses")
        .column(TableColumn::new("mobile_number", "Mobile Number"))
        .column(TableColumn::new("name", "Name"))
        .column(TableColumn::new("address", "Address"))
        .column(TableColumn::new("actions", "Actions"))
}

/// Actual-by-sport table on the dashboard.
#[must_use]
pub fn actuals_table_config() -> DataTableConfig {
    DataTableConfig::new("actuals")
        .column(TableColumn::new("sport_name", "Sport Name"))
        .column(TableColumn::numeric("net_sum", "Net Sum"))
        .column(TableColumn::new("date", "Date"))
}

/// Booking rows of the day report.
#[must_use]
pub fn bookings_table_config() -> DataTableConfig {
    DataTableConfig::new("bookings")
        .column(TableColumn::new("slot_date", "Slot Date"))
        .column(TableColumn::new("time", "Time"))
        .column(TableColumn::new("booking_id", "Booking ID"))
        .column(TableColumn::new("sport_name", "Sport Name"))
        .column(TableColumn::new("court", "Court"))
        .column(TableColumn::new("type", "Type"))
        .column(TableColumn::numeric("gross", "Gross"))
        .column(TableColumn::numeric("discount", "Discount"))
        .column(TableColumn::numeric("net", "Net"))
        .column(TableColumn::numeric("paid", "Paid"))
        .column(TableColumn::new("user_name", "User Name"))
        .column(TableColumn::new("user_mobile", "User Mobile"))
}

/// Last seven days summary table.
#[must_use]
pub fn last7_table_config() -> DataTableConfig {
    DataTableConfig::new("last7days")
        .column(TableColumn::new("date", "Date"))
        .column(TableColumn::numeric("football", "Football Income"))
        .column(TableColumn::numeric("badminton", "Badminton Income"))
        .column(TableColumn::numeric("total", "Total Income"))
        .column(TableColumn::numeric("target", "Day Target"))
        .column(TableColumn::numeric("profit", "Profit"))
}

/// Monthly report item/amount table.
#[must_use]
pub fn monthly_table_config() -> DataTableConfig {
    DataTableConfig::new("monthly")
        .column(TableColumn::new("item", "Item"))
        .column(TableColumn::numeric("amount", "Amount (QAR)"))
}

/// Invoice search results.
#[must_use]
pub fn invoice_table_config() -> DataTableConfig {
    DataTableConfig::new("invoice")
        .column(TableColumn::new("select", "Select"))
        .column(TableColumn::new("slotdate", "Date"))
        .column(TableColumn::new("slottime", "Time"))
        .column(TableColumn::numeric("slothours", "Hours"))
        .column(TableColumn::numeric("slotamount", "Amount"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last7_columns() {
        assert_eq!(
            last7_table_config().column_keys(),
            ["date", "football", "badminton", "total", "target", "profit"]
        );
    }

    #[test]
    fn test_signed_cell_classes() {
        assert_eq!(TableCell::signed("-5.00", true).class, "negative");
        assert_eq!(TableCell::signed("0.00", false).class, "positive");
    }

    #[test]
    fn test_numeric_columns() {
        let config = bookings_table_config();
        let numeric: Vec<_> = config
            .columns
            .iter()
            .filter(|c| c.numeric)
            .map(|c| c.key.as_str())
            .collect();
        assert_eq!(numeric, ["gross", "discount", "net", "paid"]);
    }
}
