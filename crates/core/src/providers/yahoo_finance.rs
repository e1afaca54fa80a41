use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use time::OffsetDateTime;
use tracing::debug;
use yahoo_finance_api::{Quote, YahooError};

use super::traits::HistoryProvider;
use crate::errors::CoreError;
use crate::models::price::{ColumnKey, GroupBy, PriceTable, CLOSE_FIELD};

const PROVIDER: &str = "Yahoo Finance";

/// Fields of every downloaded row, in column order.
pub const FIELDS: [&str; 6] = ["Open", "High", "Low", CLOSE_FIELD, "Adj Close", "Volume"];

/// Yahoo Finance history provider for index prices.
///
/// - **Free**: No API key required.
/// - **Coverage**: Global indices, equities, ETFs.
/// - **Data**: Daily OHLCV bars.
///
/// Uses the `yahoo_finance_api` crate which wraps Yahoo Finance's public
/// chart endpoint. Every `download` is one network call: no retries, no
/// caching, no timeout beyond the connector's own.
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, CoreError> {
        let connector =
            yahoo_finance_api::YahooConnector::new().map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to create connector: {e}"),
            })?;
        Ok(Self { connector })
    }

    /// Convert a `chrono::NaiveDate` to `time::OffsetDateTime` (midnight UTC).
    fn to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime, CoreError> {
        let invalid = |e: &dyn std::fmt::Display| CoreError::InvalidDate {
            value: date.to_string(),
            reason: e.to_string(),
        };

        let month = time::Month::try_from(date.month() as u8).map_err(|e| invalid(&e))?;
        let odt = time::Date::from_calendar_date(date.year(), month, date.day() as u8)
            .map_err(|e| invalid(&e))?
            .with_hms(0, 0, 0)
            .map_err(|e| invalid(&e))?
            .assume_utc();
        Ok(odt)
    }

    /// Convert a unix timestamp (seconds) to `chrono::NaiveDate`.
    fn timestamp_to_naive_date(ts: i64) -> Option<NaiveDate> {
        chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
    }

    fn columns(symbol: &str, group_by: GroupBy) -> Vec<ColumnKey> {
        FIELDS
            .iter()
            .map(|field| match group_by {
                GroupBy::Column => ColumnKey::flat(*field),
                GroupBy::Symbol => ColumnKey::tiered(symbol, *field),
            })
            .collect()
    }
}

#[async_trait]
impl HistoryProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn download(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        group_by: GroupBy,
    ) -> Result<PriceTable, CoreError> {
        let columns = Self::columns(symbol, group_by);
        if start >= end {
            return Ok(PriceTable::empty(columns));
        }

        let from = Self::to_offset_datetime(start)?;
        let to = Self::to_offset_datetime(end)?;

        let quotes = self
            .connector
            .get_quote_history(symbol, from, to)
            .await
            .and_then(|resp| resp.quotes());
        let table = quotes_to_table(quotes, symbol, start, end, group_by)?;

        debug!(symbol, rows = table.row_count(), "downloaded quote history");
        Ok(table)
    }
}

/// `true` for the connector errors Yahoo produces when a range has no
/// trading days. These are an empty answer, not a failure.
fn is_empty_answer(e: &YahooError) -> bool {
    matches!(e, YahooError::NoQuotes | YahooError::NoResult)
}

/// Turn the connector's quote list into a table of rows with `start <= date < end`.
///
/// An empty-answer error yields an empty table with the requested columns;
/// any other connector error becomes `CoreError::Api`.
pub fn quotes_to_table(
    quotes: Result<Vec<Quote>, YahooError>,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    group_by: GroupBy,
) -> Result<PriceTable, CoreError> {
    let columns = YahooFinanceProvider::columns(symbol, group_by);
    let quotes = match quotes {
        Ok(quotes) => quotes,
        Err(e) if is_empty_answer(&e) => return Ok(PriceTable::empty(columns)),
        Err(e) => {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to fetch history for {symbol}: {e}"),
            })
        }
    };

    let mut index = Vec::with_capacity(quotes.len());
    let mut values = Vec::with_capacity(quotes.len());
    for q in &quotes {
        let Some(date) = YahooFinanceProvider::timestamp_to_naive_date(q.timestamp) else {
            continue;
        };
        if date < start || date >= end {
            continue;
        }
        index.push(date);
        values.push(vec![
            Some(q.open),
            Some(q.high),
            Some(q.low),
            Some(q.close),
            Some(q.adjclose),
            Some(q.volume as f64),
        ]);
    }

    Ok(PriceTable::new(index, columns, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_datetime_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let odt = YahooFinanceProvider::to_offset_datetime(date).unwrap();
        assert_eq!(odt.year(), 2024);
        assert_eq!(odt.month(), time::Month::February);
        assert_eq!(odt.day(), 29);
        assert_eq!((odt.hour(), odt.minute(), odt.second()), (0, 0, 0));
        assert_eq!(odt.offset(), time::UtcOffset::UTC);
    }

    #[test]
    fn timestamp_converts_to_calendar_date() {
        // 2024-01-02T14:30:00Z (US market open)
        let date = YahooFinanceProvider::timestamp_to_naive_date(1_704_205_800).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn symbol_grouping_produces_tiered_columns() {
        let cols = YahooFinanceProvider::columns("^GSPC", GroupBy::Symbol);
        assert_eq!(cols.len(), FIELDS.len());
        assert!(cols.iter().all(ColumnKey::is_tiered));
        assert!(cols.contains(&ColumnKey::tiered("^GSPC", CLOSE_FIELD)));
    }

    #[test]
    fn column_grouping_produces_flat_columns() {
        let cols = YahooFinanceProvider::columns("^GSPC", GroupBy::Column);
        assert!(cols.iter().all(|c| !c.is_tiered()));
        assert!(cols.contains(&ColumnKey::flat(CLOSE_FIELD)));
    }

    fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A daily bar stamped at 14:30 UTC on the given date.
    fn quote_on(date: NaiveDate, close: f64) -> Quote {
        Quote {
            timestamp: date.and_hms_opt(14, 30, 0).unwrap().and_utc().timestamp(),
            open: close - 1.0,
            high: close + 2.0,
            low: close - 2.0,
            volume: 1_000,
            close,
            adjclose: close,
        }
    }

    #[test]
    fn no_quotes_is_an_empty_table() {
        let table = quotes_to_table(
            Err(YahooError::NoQuotes),
            "^GSPC",
            make_date(2024, 1, 13),
            make_date(2024, 1, 15),
            GroupBy::Symbol,
        )
        .unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns, YahooFinanceProvider::columns("^GSPC", GroupBy::Symbol));
    }

    #[test]
    fn no_result_is_an_empty_table() {
        let table = quotes_to_table(
            Err(YahooError::NoResult),
            "^FCHI",
            make_date(2024, 12, 25),
            make_date(2024, 12, 26),
            GroupBy::Column,
        )
        .unwrap();
        assert!(table.is_empty());
        assert!(table.has_column(CLOSE_FIELD));
    }

    #[test]
    fn other_connector_errors_are_api_errors() {
        let err = quotes_to_table(
            Err(YahooError::FetchFailed("HTTP 500".into())),
            "^DJI",
            make_date(2024, 1, 1),
            make_date(2024, 2, 1),
            GroupBy::Symbol,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Api { ref provider, ref message }
                if provider == PROVIDER && message.starts_with("Failed to fetch history for ^DJI")
        ));
    }

    #[test]
    fn quotes_become_a_tiered_table() {
        let quotes = vec![
            quote_on(make_date(2024, 1, 2), 100.0),
            quote_on(make_date(2024, 1, 3), 110.0),
        ];
        let table = quotes_to_table(
            Ok(quotes),
            "^GSPC",
            make_date(2024, 1, 1),
            make_date(2024, 1, 5),
            GroupBy::Symbol,
        )
        .unwrap();
        assert_eq!(table.index, vec![make_date(2024, 1, 2), make_date(2024, 1, 3)]);
        assert!(table.has_tiered_columns());

        let series = table.normalize_columns().unwrap().into_series(CLOSE_FIELD).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].close, 100.0);
        assert_eq!(series[1].close, 110.0);
    }

    #[test]
    fn quotes_outside_the_range_are_filtered() {
        let quotes = vec![
            quote_on(make_date(2023, 12, 29), 90.0),
            quote_on(make_date(2024, 1, 2), 100.0),
            quote_on(make_date(2024, 1, 5), 105.0),
        ];
        let table = quotes_to_table(
            Ok(quotes),
            "^GSPC",
            make_date(2024, 1, 1),
            make_date(2024, 1, 5),
            GroupBy::Column,
        )
        .unwrap();
        // end is exclusive
        assert_eq!(table.index, vec![make_date(2024, 1, 2)]);
        assert_eq!(table.column(CLOSE_FIELD).unwrap(), vec![Some(100.0)]);
    }
}
