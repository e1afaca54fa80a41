use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::price::{GroupBy, PriceTable};

/// Trait abstraction for the historical price data source.
///
/// The update pipeline only talks to this trait, so the live Yahoo Finance
/// connector can be swapped for a canned table in tests.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Download daily bars for `symbol` with `start <= date < end`.
    ///
    /// Returns an empty table when the source has nothing for the range.
    /// With `GroupBy::Symbol` the columns are tiered as `(symbol, field)`.
    async fn download(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        group_by: GroupBy,
    ) -> Result<PriceTable, CoreError>;
}
