//! Dashboard: actual income by sport for today.

use askama::Template;
use axum::{Router, extract::State, response::Response, routing::get};
use falcon_core::{LoadTrigger, RemoteView, Screen, SportActuals};
use tracing::instrument;

use crate::components::data_table::{DataTableConfig, TableCell, TableRow, actuals_table_config};
use crate::filters;
use crate::middleware::RequireSession;
use crate::resources::SportActualsResource;
use crate::state::AppState;

use super::layout::{Shell, SummaryLine, render};

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    shell: Shell,
    table: DataTableConfig,
    rows: Vec<TableRow>,
    lines: Vec<SummaryLine>,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

fn actual_rows(actuals: &SportActuals) -> Vec<TableRow> {
    actuals
        .net_sums
        .iter()
        .map(|sum| {
            TableRow::new(vec![
                TableCell::text(sum.sport_name.as_str()),
                TableCell::amount(sum.net_sum.to_string()),
                TableCell::text(sum.date_value.as_str()),
            ])
        })
        .collect()
}

fn actual_lines(actuals: &SportActuals) -> Vec<SummaryLine> {
    vec![
        SummaryLine::new("Daily Target", actuals.daily_target.to_string()),
        SummaryLine::new("Day Sum", actuals.day_sum.to_string()),
        SummaryLine::signed(
            "Day Profit",
            actuals.day_profit.to_string(),
            actuals.day_profit.is_negative(),
        ),
    ]
}

/// GET /dashboard
#[instrument(skip(state, _gate))]
async fn dashboard(State(state): State<AppState>, RequireSession(_gate): RequireSession) -> Response {
    let mut view = RemoteView::new(SportActualsResource::new(state.api().clone()));
    view.load(LoadTrigger::Activation).await;

    let (rows, lines) = view
        .data()
        .map(|actuals| (actual_rows(actuals), actual_lines(actuals)))
        .unwrap_or_default();

    render(&DashboardTemplate {
        shell: Shell::new(Screen::Dashboard, true).with_error(view.error()),
        table: actuals_table_config(),
        rows,
        lines,
    })
}
