//! Report screens against the fake backend.

#![allow(clippy::unwrap_used)]

use falcon_integration_tests::{TestContext, has_error_banner, row_count};
use serde_json::json;

fn booking(id: &str, net: i64, paid: i64) -> serde_json::Value {
    json!({
        "slotDate": "2025-01-06T00:00:00",
        "time": "18:00",
        "bookingId": id,
        "sportName": "Football",
        "court": "Court 1",
        "type": "Online",
        "gross": net,
        "discount": 0,
        "net": net,
        "paid": paid,
        "userName": "Ali",
        "userMobile": "55501234"
    })
}

#[tokio::test]
async fn test_dashboard_loads_actuals_on_open() {
    let ctx = TestContext::logged_in().await;
    ctx.backend.set_actuals(json!({
        "netSums": [
            {"sportName": "Football", "netSum": 300, "dateValue": "2025-01-06"},
            {"sportName": "Badminton", "netSum": 120, "dateValue": "2025-01-06"}
        ],
        "dailyTarget": 500,
        "daySum": 420,
        "dayprofit": -80
    }));
    let html = ctx.page("/dashboard").await;

    assert_eq!(row_count(&html), 2);
    assert!(html.contains("Badminton"));
    assert!(html.contains("class=\"negative\""));
    assert_eq!(ctx.backend.requests(), ["GET /api/dailyreport"]);
}

#[tokio::test]
async fn test_day_report_waits_for_a_date() {
    let ctx = TestContext::logged_in().await;
    let html = ctx.page("/dayreport").await;

    assert_eq!(row_count(&html), 0);
    assert!(ctx.backend.requests().is_empty());
}

#[tokio::test]
async fn test_day_report_recomputes_zero_total() {
    let ctx = TestContext::logged_in().await;
    ctx.backend.set_day_report(json!({
        "dailyIncomeSummary": {
            "slotDate": "2025-01-06",
            "footballSum": 100,
            "badmintonSum": 50,
            "totalSum": 0,
            "dayTarget": 120,
            "profit": 0
        },
        "bookingDatas": [booking("B1", 100, 100), booking("B2", 50, 20)]
    }));
    let html = ctx.page("/dayreport?date=2025-01-06").await;

    assert!(html.contains("<dd>150</dd>"));
    assert!(html.contains("<dd class=\"positive\">30</dd>"));
    assert_eq!(row_count(&html), 2);
    assert_eq!(html.matches("data-row outstanding").count(), 1);
    assert!(html.contains("https://wa.me/?text="));
    assert_eq!(ctx.backend.requests(), ["GET /api/DayReport/DayReport"]);
}

#[tokio::test]
async fn test_day_report_without_bookings_shows_no_data() {
    let ctx = TestContext::logged_in().await;
    ctx.backend.set_day_report(json!({"dailyIncomeSummary": null}));
    let html = ctx.page("/dayreport?date=2025-01-06").await;

    assert!(has_error_banner(&html));
    assert!(html.contains("No data fetched"));
    assert_eq!(row_count(&html), 0);
}

#[tokio::test]
async fn test_day_report_rejects_bad_date_without_calling() {
    let ctx = TestContext::logged_in().await;
    let html = ctx.page("/dayreport?date=06%2F01%2F2025").await;

    assert!(html.contains("Please select a valid date."));
    assert!(ctx.backend.requests().is_empty());
}

#[tokio::test]
async fn test_last_7_days_marks_losses() {
    let ctx = TestContext::logged_in().await;
    ctx.backend.set_last7(json!([
        {"slotDate": "2025-01-06", "footballSum": 100, "badmintonSum": 50,
         "totalSum": 150, "dayTarget": 200, "profit": -50},
        {"slotDate": "2025-01-07", "footballSum": 300, "badmintonSum": 0,
         "totalSum": 300, "dayTarget": 200, "profit": 100}
    ]));
    let html = ctx.page("/last7days").await;

    assert_eq!(row_count(&html), 2);
    assert!(html.contains("Monday Jan 06, 2025"));
    assert!(html.contains("<td class=\"negative\">-50.00</td>"));
    assert!(html.contains("<td class=\"positive\">100.00</td>"));
}

#[tokio::test]
async fn test_last_7_days_failure_shows_banner() {
    let ctx = TestContext::logged_in().await;
    ctx.backend.fail_reads(true);
    let html = ctx.page("/last7days").await;

    assert!(has_error_banner(&html));
    assert_eq!(row_count(&html), 0);
}

#[tokio::test]
async fn test_monthly_report_on_request() {
    let ctx = TestContext::logged_in().await;
    ctx.backend.set_monthly(json!({
        "footballSum": 9000,
        "badmintonSum": 3000,
        "totalSum": 0,
        "dayTarget": 15000,
        "profit": 0
    }));

    ctx.page("/monthlyreport").await;
    assert!(ctx.backend.requests().is_empty());

    let html = ctx.page("/monthlyreport?month=1&year=2025").await;
    assert_eq!(row_count(&html), 5);
    assert!(html.contains("Total Collection"));
    assert!(html.contains("9000"));
    // Reported zeros are shown as-is, not recomputed.
    assert!(!html.contains("12000"));
    assert!(!html.contains("-3000"));
    assert!(html.contains("<td class=\"positive\">0</td>"));
    assert!(html.contains("<option value=\"2025\" selected>"));
    assert_eq!(ctx.backend.requests(), ["GET /api/dailyreport/monthlyreport"]);
}

#[tokio::test]
async fn test_pending_amounts_text() {
    let ctx = TestContext::logged_in().await;
    ctx.backend.set_pending("Ali: 100\nSara: 50");
    let html = ctx
        .page("/pendingamounts?fromDate=2025-01-01&toDate=2025-01-31")
        .await;

    assert!(html.contains("Ali: 100\nSara: 50"));
    assert!(html.contains("data-copy-target=\"pending-report\""));
    assert_eq!(ctx.backend.requests(), ["GET /api/DayReport/PendingAmounts"]);
}
