// ═══════════════════════════════════════════════════════════════════
// Integration Tests — IndexDashboard facade end to end
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};

use index_dashboard_core::errors::CoreError;
use index_dashboard_core::models::outcome::Outcome;
use index_dashboard_core::models::price::{ColumnKey, GroupBy, PriceTable, CLOSE_FIELD};
use index_dashboard_core::models::settings::Settings;
use index_dashboard_core::providers::traits::HistoryProvider;
use index_dashboard_core::{IndexDashboard, UpdateRequest};

/// Simulated market: weekday bars only, close grows by 1 per trading day
/// from 100. Nothing before 2000.
struct SimulatedMarket;

#[async_trait]
impl HistoryProvider for SimulatedMarket {
    fn name(&self) -> &str {
        "SimulatedMarket"
    }

    async fn download(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        group_by: GroupBy,
    ) -> Result<PriceTable, CoreError> {
        let columns = match group_by {
            GroupBy::Column => vec![ColumnKey::flat(CLOSE_FIELD)],
            GroupBy::Symbol => vec![ColumnKey::tiered(symbol, CLOSE_FIELD)],
        };
        let mut index = Vec::new();
        let mut values = Vec::new();
        let mut date = start.max(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        let mut close = 100.0;
        while date < end {
            if date.weekday().number_from_monday() <= 5 {
                index.push(date);
                values.push(vec![Some(close)]);
                close += 1.0;
            }
            date = date.succ_opt().unwrap();
        }
        Ok(PriceTable::new(index, columns, values))
    }
}

fn dashboard() -> IndexDashboard {
    IndexDashboard::new(Settings::default(), Box::new(SimulatedMarket)).unwrap()
}

#[test]
fn rejects_unknown_default_symbol() {
    let settings = Settings {
        default_symbol: "^RUT".into(),
        ..Settings::default()
    };
    let err = IndexDashboard::new(settings, Box::new(SimulatedMarket)).unwrap_err();
    assert!(matches!(err, CoreError::UnknownIndex(s) if s == "^RUT"));
}

#[test]
fn exposes_registry_in_display_order() {
    let d = dashboard();
    let indices = d.indices();
    assert_eq!(indices.len(), 10);
    assert_eq!(indices[0].name, "Dow Jones");
    assert_eq!(indices[9].name, "Euro Stoxx 50");
}

#[test]
fn default_request_matches_settings() {
    let d = dashboard();
    assert_eq!(
        d.default_request(),
        UpdateRequest {
            symbol: "^GSPC".into(),
            start: "2020-01-01".into(),
            end: "2024-12-31".into(),
        }
    );
}

#[test]
fn debug_output_names_provider() {
    let dbg = format!("{:?}", dashboard());
    assert!(dbg.contains("SimulatedMarket"));
    assert!(dbg.contains("indices: 10"));
}

#[tokio::test]
async fn one_trading_week() {
    // Mon 2024-01-08 .. Fri 2024-01-12, end exclusive on the following Monday
    let r = dashboard()
        .update("^GSPC", "2024-01-08", "2024-01-15")
        .await;
    assert!(r.outcome.is_success());
    assert_eq!(r.chart.points.len(), 5);
    // 100 -> 104
    assert_eq!(
        r.explanation,
        "The **S&P 500** index increased by 4.00% over this period."
    );
}

#[tokio::test]
async fn weekend_only_range_is_empty() {
    let r = dashboard()
        .update("^FCHI", "2024-01-13", "2024-01-15")
        .await;
    assert_eq!(r.outcome, Outcome::EmptyResult);
    assert_eq!(
        r.explanation,
        "No data could be retrieved for **CAC 40** between 2024-01-13 and 2024-01-15."
    );
}

#[tokio::test]
async fn single_trading_day_is_insufficient() {
    let r = dashboard()
        .update("^GDAXI", "2024-01-12", "2024-01-15")
        .await;
    assert_eq!(r.outcome, Outcome::InsufficientRows { rows: 1 });
}

#[tokio::test]
async fn reversed_range_is_empty() {
    let r = dashboard()
        .update("^DJI", "2024-12-31", "2020-01-01")
        .await;
    assert_eq!(r.outcome, Outcome::EmptyResult);
}

#[tokio::test]
async fn default_request_round_trip() {
    let d = dashboard();
    let r = d.update_request(&d.default_request()).await;
    assert!(r.outcome.is_success());
    assert_eq!(r.symbol, "^GSPC");
    assert_eq!(r.chart.points.first().unwrap().date.to_string(), "2020-01-01");
}

#[tokio::test]
async fn result_serializes_for_the_page() {
    let r = dashboard()
        .update("^IXIC", "2024-01-08", "2024-01-10")
        .await;
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["symbol"], "^IXIC");
    assert_eq!(json["outcome"]["kind"], "success");
    assert_eq!(json["chart"]["title"], "Evolution of Nasdaq");
    assert_eq!(json["chart"]["x_field"], "Date");
    assert_eq!(json["chart"]["y_field"], "Close");
    assert_eq!(json["chart"]["points"].as_array().unwrap().len(), 2);
}
