//! Report commands.

use std::io::Write;

use falcon_admin::resources::{
    DayReportResource, Last7DaysResource, MonthlyReportResource, PendingAmountsResource,
    SportActualsResource,
};
use falcon_core::{
    DailyIncomeSummary, DayDetail, IncomeFigures, LoadTrigger, MonthlyQuery, MonthlySummary,
    PendingAmountsQuery, RemoteResource, RemoteView, RequestError, SlotDate, SportActuals,
};

use super::{CommandError, Context, write_table};

/// Run one read, turning a failed load into its banner message.
async fn fetch<R: RemoteResource>(resource: R) -> Result<R::Output, CommandError> {
    let mut view = RemoteView::new(resource);
    view.load(LoadTrigger::UserAction).await;
    if let Some(error) = view.error() {
        return Err(error.clone().into());
    }
    view.into_data()
        .ok_or_else(|| RequestError::new(R::LOAD_FAILURE).into())
}

fn write_day<W: Write>(out: &mut W, detail: &DayDetail) -> Result<(), CommandError> {
    if detail.is_empty_response() {
        return Err(RequestError::new(DayDetail::NO_DATA_MESSAGE).into());
    }
    if let Some(summary) = &detail.daily_income_summary {
        writeln!(out, "{}", summary.share_text())?;
        writeln!(out)?;
    }
    let rows: Vec<Vec<String>> = detail
        .booking_datas
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|b| {
            vec![
                b.time.clone(),
                b.booking_id.clone(),
                b.sport_name.clone(),
                b.court.clone(),
                b.booking_type.clone(),
                b.net.to_string(),
                b.paid.to_string(),
                b.user_name.clone(),
                b.user_mobile.clone(),
                if b.has_outstanding_balance() { "*" } else { "" }.to_owned(),
            ]
        })
        .collect();
    write_table(
        out,
        &[
            "Time", "Booking ID", "Sport", "Court", "Type", "Net", "Paid", "User Name",
            "User Mobile", "Due",
        ],
        &rows,
    )?;
    Ok(())
}

fn write_last7<W: Write>(out: &mut W, days: &[DailyIncomeSummary]) -> std::io::Result<()> {
    let rows: Vec<Vec<String>> = days
        .iter()
        .map(|d| {
            vec![
                d.slot_date.long_display(),
                d.football_sum.fixed2(),
                d.badminton_sum.fixed2(),
                d.reported_total_or_zero().fixed2(),
                d.day_target.fixed2(),
                d.reported_profit_or_zero().fixed2(),
            ]
        })
        .collect();
    write_table(
        out,
        &[
            "Date",
            "Football Income",
            "Badminton Income",
            "Total Income",
            "Day Target",
            "Profit",
        ],
        &rows,
    )
}

fn write_monthly<W: Write>(out: &mut W, summary: &MonthlySummary) -> std::io::Result<()> {
    let rows = vec![
        vec!["Football Collection".to_owned(), summary.football_sum.to_string()],
        vec!["Badminton Collection".to_owned(), summary.badminton_sum.to_string()],
        vec!["Total Collection".to_owned(), summary.reported_total_or_zero().to_string()],
        vec!["Monthly Target".to_owned(), summary.day_target.to_string()],
        vec!["Monthly Profit".to_owned(), summary.reported_profit_or_zero().to_string()],
    ];
    write_table(out, &["Item", "Amount (QAR)"], &rows)
}

fn write_actuals<W: Write>(out: &mut W, actuals: &SportActuals) -> std::io::Result<()> {
    let rows: Vec<Vec<String>> = actuals
        .net_sums
        .iter()
        .map(|s| vec![s.sport_name.clone(), s.net_sum.to_string(), s.date_value.clone()])
        .collect();
    write_table(out, &["Sport Name", "Net Sum", "Date"], &rows)?;
    writeln!(out)?;
    writeln!(out, "Daily Target: {}", actuals.daily_target)?;
    writeln!(out, "Day Sum: {}", actuals.day_sum)?;
    writeln!(out, "Day Profit: {}", actuals.day_profit)
}

/// `report day [--date]`
///
/// # Errors
///
/// Returns error if not logged in, the read fails, or the backend sent no
/// booking list.
pub async fn day<W: Write>(ctx: &Context, out: &mut W, date: SlotDate) -> Result<(), CommandError> {
    ctx.require_session()?;
    let detail = fetch(DayReportResource::new(ctx.api.clone(), date)).await?;
    write_day(out, &detail)
}

/// `report last7`
///
/// # Errors
///
/// Returns error if not logged in or the read fails.
pub async fn last_7_days<W: Write>(ctx: &Context, out: &mut W) -> Result<(), CommandError> {
    ctx.require_session()?;
    let days = fetch(Last7DaysResource::new(ctx.api.clone())).await?;
    write_last7(out, &days)?;
    Ok(())
}

/// `report monthly [--month] [--year]`
///
/// # Errors
///
/// Returns error if not logged in or the read fails.
pub async fn monthly<W: Write>(
    ctx: &Context,
    out: &mut W,
    query: MonthlyQuery,
) -> Result<(), CommandError> {
    ctx.require_session()?;
    let summary = fetch(MonthlyReportResource::new(ctx.api.clone(), query)).await?;
    write_monthly(out, &summary)?;
    Ok(())
}

/// `report pending [--from] [--to]`
///
/// # Errors
///
/// Returns error if not logged in or the read fails.
pub async fn pending<W: Write>(
    ctx: &Context,
    out: &mut W,
    query: PendingAmountsQuery,
) -> Result<(), CommandError> {
    ctx.require_session()?;
    let text = fetch(PendingAmountsResource::new(ctx.api.clone(), query)).await?;
    writeln!(out, "{text}")?;
    Ok(())
}

/// `report actuals`
///
/// # Errors
///
/// Returns error if not logged in or the read fails.
pub async fn actuals<W: Write>(ctx: &Context, out: &mut W) -> Result<(), CommandError> {
    ctx.require_session()?;
    let actuals = fetch(SportActualsResource::new(ctx.api.clone())).await?;
    write_actuals(out, &actuals)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use falcon_core::Amount;

    use super::*;

    #[test]
    fn test_day_without_bookings_is_no_data() {
        let detail = DayDetail {
            daily_income_summary: None,
            booking_datas: None,
        };
        let err = write_day(&mut Vec::new(), &detail).unwrap_err();
        assert_eq!(err.to_string(), "No data fetched");
    }

    #[test]
    fn test_monthly_shows_reported_values() {
        let summary = MonthlySummary {
            football_sum: Amount::whole(1000),
            badminton_sum: Amount::whole(500),
            total_sum: None,
            day_target: Amount::whole(2000),
            profit: Some(Amount::whole(-250)),
        };
        let mut out = Vec::new();
        write_monthly(&mut out, &summary).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Total Collection      0"));
        assert!(text.contains("Monthly Profit        -250"));
    }
}
