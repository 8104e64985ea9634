//! Report screens: day report, last seven days, monthly, pending amounts.
//!
//! The last-seven-days report loads as soon as the screen opens. The other
//! three wait for the operator to pick dates; the form submits with GET so
//! a report URL can be bookmarked.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::Response,
    routing::get,
};
use chrono::{Datelike, Local, NaiveDate};
use falcon_core::{
    BookingData, DailyIncomeSummary, DayDetail, IncomeFigures, LoadTrigger, MonthlyQuery,
    MonthlySummary, PendingAmountsQuery, RemoteView, Screen, SlotDate, ValidationError,
};
use serde::Deserialize;
use tracing::instrument;

use crate::components::data_table::{
    DataTableConfig, TableCell, TableRow, bookings_table_config, last7_table_config,
    monthly_table_config,
};
use crate::filters;
use crate::middleware::RequireSession;
use crate::resources::{
    DayReportResource, Last7DaysResource, MonthlyReportResource, PendingAmountsResource,
};
use crate::state::AppState;

use super::layout::{Shell, SummaryLine, render};

const INVALID_DATE_MESSAGE: &str = "Please select a valid date.";

/// Build the reports router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dayreport", get(day_report))
        .route("/last7days", get(last_7_days))
        .route("/monthlyreport", get(monthly_report))
        .route("/pendingamounts", get(pending_amounts))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_date(raw: &str) -> Result<SlotDate, ValidationError> {
    SlotDate::parse(raw.trim()).map_err(|_| ValidationError::new(INVALID_DATE_MESSAGE))
}

// =============================================================================
// Day report
// =============================================================================

/// Day report template.
#[derive(Template)]
#[template(path = "day_report.html")]
struct DayReportTemplate {
    shell: Shell,
    date: String,
    summary: Vec<SummaryLine>,
    share_text: Option<String>,
    table: DataTableConfig,
    rows: Vec<TableRow>,
    show_table: bool,
}

#[derive(Debug, Deserialize)]
pub struct DayReportParams {
    pub date: Option<String>,
}

fn summary_lines(summary: &DailyIncomeSummary) -> Vec<SummaryLine> {
    let profit = summary.display_profit();
    vec![
        SummaryLine::new("Slot Date", summary.slot_date.short_display()),
        SummaryLine::new("Football Sum", summary.football_sum.to_string()),
        SummaryLine::new("Badminton Sum", summary.badminton_sum.to_string()),
        SummaryLine::new("Total Sum", summary.display_total().to_string()),
        SummaryLine::new("Day Target", summary.day_target.to_string()),
        SummaryLine::signed("Profit", profit.to_string(), profit.is_negative()),
    ]
}

fn booking_rows(bookings: &[BookingData]) -> Vec<TableRow> {
    bookings
        .iter()
        .map(|booking| {
            let row = TableRow::new(vec![
                TableCell::text(booking.slot_date.short_display()),
                TableCell::text(booking.time.as_str()),
                TableCell::text(booking.booking_id.as_str()),
                TableCell::text(booking.sport_name.as_str()),
                TableCell::text(booking.court.as_str()),
                TableCell::text(booking.booking_type.as_str()),
                TableCell::amount(booking.gross.to_string()),
                TableCell::amount(booking.discount.to_string()),
                TableCell::amount(booking.net.to_string()),
                TableCell::amount(booking.paid.to_string()),
                TableCell::text(booking.user_name.as_str()),
                TableCell::text(booking.user_mobile.as_str()),
            ]);
            if booking.has_outstanding_balance() {
                row.with_class("outstanding")
            } else {
                row
            }
        })
        .collect()
}

/// GET /dayreport?date=
#[instrument(skip(state, _gate))]
async fn day_report(
    State(state): State<AppState>,
    RequireSession(_gate): RequireSession,
    Query(params): Query<DayReportParams>,
) -> Response {
    let shell = Shell::new(Screen::DayReport, true);
    let mut template = DayReportTemplate {
        shell,
        date: SlotDate::new(today()).wire(),
        summary: vec![],
        share_text: None,
        table: bookings_table_config(),
        rows: vec![],
        show_table: false,
    };

    let Some(raw) = params.date else {
        return render(&template);
    };
    template.date = raw.trim().to_owned();

    let date = match parse_date(&raw) {
        Ok(date) => date,
        Err(e) => {
            template.shell = template.shell.with_banner(e.message());
            return render(&template);
        }
    };

    let mut view = RemoteView::new(DayReportResource::new(state.api().clone(), date));
    view.load(LoadTrigger::UserAction).await;
    template.shell = template.shell.with_error(view.error());

    if let Some(detail) = view.into_data() {
        apply_day_detail(&mut template, &detail);
    }

    render(&template)
}

fn apply_day_detail(template: &mut DayReportTemplate, detail: &DayDetail) {
    if detail.is_empty_response() {
        template.shell.banner = Some(DayDetail::NO_DATA_MESSAGE.to_owned());
        return;
    }
    if let Some(summary) = &detail.daily_income_summary {
        template.summary = summary_lines(summary);
        template.share_text = Some(summary.share_text());
    }
    template.rows = booking_rows(detail.booking_datas.as_deref().unwrap_or_default());
    template.show_table = true;
}

// =============================================================================
// Last 7 days
// =============================================================================

/// Last seven days template.
#[derive(Template)]
#[template(path = "last7days.html")]
struct Last7DaysTemplate {
    shell: Shell,
    table: DataTableConfig,
    rows: Vec<TableRow>,
}

fn last7_rows(days: &[DailyIncomeSummary]) -> Vec<TableRow> {
    days.iter()
        .map(|day| {
            let profit = day.reported_profit_or_zero();
            TableRow::new(vec![
                TableCell::text(day.slot_date.long_display()),
                TableCell::amount(day.football_sum.fixed2()),
                TableCell::amount(day.badminton_sum.fixed2()),
                TableCell::amount(day.reported_total_or_zero().fixed2()),
                TableCell::amount(day.day_target.fixed2()),
                TableCell::signed(profit.fixed2(), profit.is_negative()),
            ])
        })
        .collect()
}

/// GET /last7days
#[instrument(skip(state, _gate))]
async fn last_7_days(State(state): State<AppState>, RequireSession(_gate): RequireSession) -> Response {
    let mut view = RemoteView::new(Last7DaysResource::new(state.api().clone()));
    view.load(LoadTrigger::Activation).await;

    render(&Last7DaysTemplate {
        shell: Shell::new(Screen::Last7Days, true).with_error(view.error()),
        table: last7_table_config(),
        rows: view.data().map(|days| last7_rows(days)).unwrap_or_default(),
    })
}

// =============================================================================
// Monthly report
// =============================================================================

/// Selector option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Monthly report template.
#[derive(Template)]
#[template(path = "monthly_report.html")]
struct MonthlyReportTemplate {
    shell: Shell,
    months: Vec<SelectOption>,
    years: Vec<SelectOption>,
    table: DataTableConfig,
    rows: Vec<TableRow>,
    show_table: bool,
}

#[derive(Debug, Deserialize)]
pub struct MonthlyParams {
    pub month: Option<String>,
    pub year: Option<String>,
}

fn month_options(selected: u32) -> Vec<SelectOption> {
    (1..=12u32)
        .zip(MonthlyQuery::MONTH_LABELS)
        .map(|(month, label)| SelectOption {
            value: month.to_string(),
            label: label.to_owned(),
            selected: month == selected,
        })
        .collect()
}

fn year_options(selected: i32, current_year: i32) -> Vec<SelectOption> {
    MonthlyQuery::selectable_years(current_year)
        .into_iter()
        .map(|year| SelectOption {
            value: year.to_string(),
            label: year.to_string(),
            selected: year == selected,
        })
        .collect()
}

fn parse_monthly(month: &str, year: &str) -> Result<MonthlyQuery, ValidationError> {
    let month = month
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::for_field("month", "Please select a month."))?;
    let year = year
        .trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::for_field("year", "Please select a year."))?;
    MonthlyQuery::new(month, year)
}

fn monthly_rows(summary: &MonthlySummary) -> Vec<TableRow> {
    let profit = summary.reported_profit_or_zero();
    let line = |item: &str, value: String| {
        TableRow::new(vec![TableCell::text(item), TableCell::amount(value)])
    };
    vec![
        line("Football Collection", summary.football_sum.to_string()),
        line("Badminton Collection", summary.badminton_sum.to_string()),
        line("Total Collection", summary.reported_total_or_zero().to_string()),
        line("Monthly Target", summary.day_target.to_string()),
        TableRow::new(vec![
            TableCell::text("Monthly Profit"),
            TableCell::signed(profit.to_string(), profit.is_negative()),
        ]),
    ]
}

/// GET /monthlyreport?month=&year=
#[instrument(skip(state, _gate))]
async fn monthly_report(
    State(state): State<AppState>,
    RequireSession(_gate): RequireSession,
    Query(params): Query<MonthlyParams>,
) -> Response {
    let today = today();
    let default = MonthlyQuery::containing(today);
    let mut shell = Shell::new(Screen::MonthlyReport, true);
    let mut rows = vec![];
    let mut show_table = false;

    let selected = match (params.month, params.year) {
        (Some(month), Some(year)) => match parse_monthly(&month, &year) {
            Ok(query) => {
                let mut view =
                    RemoteView::new(MonthlyReportResource::new(state.api().clone(), query));
                view.load(LoadTrigger::UserAction).await;
                shell = shell.with_error(view.error());
                if let Some(summary) = view.data() {
                    rows = monthly_rows(summary);
                    show_table = true;
                }
                query
            }
            Err(e) => {
                shell = shell.with_banner(e.message());
                default
            }
        },
        _ => default,
    };

    render(&MonthlyReportTemplate {
        shell,
        months: month_options(selected.month()),
        years: year_options(selected.year(), today.year()),
        table: monthly_table_config(),
        rows,
        show_table,
    })
}

// =============================================================================
// Pending amounts
// =============================================================================

/// Pending amounts template.
#[derive(Template)]
#[template(path = "pending_amounts.html")]
struct PendingAmountsTemplate {
    shell: Shell,
    from_date: String,
    to_date: String,
    report: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingParams {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

fn parse_window(from: &str, to: &str) -> Result<PendingAmountsQuery, ValidationError> {
    PendingAmountsQuery::new(parse_date(from)?, parse_date(to)?)
}

/// GET /pendingamounts?fromDate=&toDate=
#[instrument(skip(state, _gate))]
async fn pending_amounts(
    State(state): State<AppState>,
    RequireSession(_gate): RequireSession,
    Query(params): Query<PendingParams>,
) -> Response {
    let default = PendingAmountsQuery::ending(today());
    let mut template = PendingAmountsTemplate {
        shell: Shell::new(Screen::PendingAmounts, true),
        from_date: default.from_date().wire(),
        to_date: default.to_date().wire(),
        report: None,
    };

    let (Some(from), Some(to)) = (params.from_date, params.to_date) else {
        return render(&template);
    };
    template.from_date = from.trim().to_owned();
    template.to_date = to.trim().to_owned();

    match parse_window(&from, &to) {
        Ok(query) => {
            let mut view = RemoteView::new(PendingAmountsResource::new(state.api().clone(), query));
            view.load(LoadTrigger::UserAction).await;
            template.shell = template.shell.with_error(view.error());
            template.report = view.into_data();
        }
        Err(e) => template.shell = template.shell.with_banner(e.message()),
    }

    render(&template)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use falcon_core::Amount;

    use super::*;

    fn day(profit: i64) -> DailyIncomeSummary {
        DailyIncomeSummary {
            slot_date: SlotDate::parse("2025-01-06").unwrap(),
            football_sum: Amount::whole(100),
            badminton_sum: Amount::whole(50),
            total_sum: Some(Amount::ZERO),
            day_target: Amount::whole(200),
            profit: Some(Amount::whole(profit)),
        }
    }

    #[test]
    fn test_summary_recomputes_zero_total() {
        let lines = summary_lines(&day(10));
        let total = lines.iter().find(|l| l.label == "Total Sum").unwrap();
        assert_eq!(total.value, "150");
    }

    #[test]
    fn test_last7_marks_negative_profit() {
        let rows = last7_rows(&[day(-5), day(30)]);
        assert_eq!(rows[0].cells[5].class, "negative");
        assert_eq!(rows[0].cells[5].text, "-5.00");
        assert_eq!(rows[1].cells[5].class, "positive");
        assert_eq!(rows[0].cells[0].text, "Monday Jan 06, 2025");
    }

    #[test]
    fn test_last7_shows_break_even_as_reported() {
        let break_even = DailyIncomeSummary {
            total_sum: Some(Amount::whole(200)),
            ..day(0)
        };
        let rows = last7_rows(&[break_even]);
        assert_eq!(rows[0].cells[3].text, "200.00");
        assert_eq!(rows[0].cells[5].text, "0.00");
        assert_eq!(rows[0].cells[5].class, "positive");
    }

    #[test]
    fn test_last7_missing_values_show_zero() {
        let sparse = DailyIncomeSummary {
            total_sum: None,
            profit: None,
            ..day(0)
        };
        let rows = last7_rows(&[sparse]);
        assert_eq!(rows[0].cells[3].text, "0.00");
        assert_eq!(rows[0].cells[5].text, "0.00");
    }

    #[test]
    fn test_monthly_rows_show_reported_values() {
        let summary = MonthlySummary {
            football_sum: Amount::whole(9000),
            badminton_sum: Amount::whole(3000),
            total_sum: Some(Amount::ZERO),
            day_target: Amount::whole(15000),
            profit: Some(Amount::ZERO),
        };
        let rows = monthly_rows(&summary);
        assert_eq!(rows[2].cells[1].text, "0");
        assert_eq!(rows[4].cells[1].text, "0");
        assert_eq!(rows[4].cells[1].class, "positive");
    }

    #[test]
    fn test_month_options_select_one() {
        let options = month_options(3);
        assert_eq!(options.len(), 12);
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
        assert_eq!(options[2].label, "MAR");
        assert!(options[2].selected);
    }

    #[test]
    fn test_parse_monthly_rejects_bad_month() {
        assert!(parse_monthly("13", "2025").is_err());
        assert!(parse_monthly("", "2025").is_err());
        assert_eq!(parse_monthly("2", "2025").unwrap().month(), 2);
    }

    #[test]
    fn test_parse_window_rejects_reversed_dates() {
        let err = parse_window("2025-02-01", "2025-01-01").unwrap_err();
        assert_eq!(err.message(), "From date must not be after To date.");
        assert!(parse_window("2025-01-01", "garbage").is_err());
    }
}
