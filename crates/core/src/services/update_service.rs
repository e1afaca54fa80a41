use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info_span, warn, Instrument};

use crate::errors::CoreError;
use crate::models::index::IndexRegistry;
use crate::models::outcome::{UpdateResult, Variation};
use crate::models::price::{GroupBy, CLOSE_FIELD};
use crate::providers::traits::HistoryProvider;
use crate::services::chart_service::ChartService;

/// The update pipeline: (symbol, start, end) → chart + explanation.
///
/// Steps, in order, each threaded with `?`:
/// 1. Resolve the symbol in the registry (unknown symbols never reach the provider)
/// 2. Parse both dates
/// 3. Download with symbol grouping → empty table ⇒ empty-result
/// 4. Drop the outer column tier if present → no `Close` ⇒ missing-close-column
/// 5. Turn the date index into a series → fewer than 2 rows ⇒ insufficient-rows
/// 6. Variation between the first and last close ⇒ success
///
/// Any error in these steps collapses into a single processing-error result
/// carrying the error's message. `update` itself never fails.
pub struct UpdateService {
    registry: IndexRegistry,
    provider: Box<dyn HistoryProvider>,
    chart_service: ChartService,
}

impl UpdateService {
    pub fn new(registry: IndexRegistry, provider: Box<dyn HistoryProvider>) -> Self {
        Self {
            registry,
            provider,
            chart_service: ChartService::new(),
        }
    }

    pub fn registry(&self) -> &IndexRegistry {
        &self.registry
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Run one update. Always returns a renderable result.
    pub async fn update(&self, symbol: &str, start: &str, end: &str) -> UpdateResult {
        let span = info_span!("update", symbol, start, end);
        async {
            match self.run(symbol, start, end).await {
                Ok(result) => {
                    debug!(outcome = ?result.outcome, "update finished");
                    result
                }
                Err(e) => {
                    warn!(error = %e, "update failed");
                    self.chart_service.processing_error(symbol, &e.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, symbol: &str, start: &str, end: &str) -> Result<UpdateResult, CoreError> {
        let index = self
            .registry
            .lookup(symbol)
            .ok_or_else(|| CoreError::UnknownIndex(symbol.to_string()))?;
        let name = index.name.as_str();

        let start_date = parse_date(start)?;
        let end_date = parse_date(end)?;

        let table = self
            .provider
            .download(symbol, start_date, end_date, GroupBy::Symbol)
            .await?;
        debug!(provider = self.provider.name(), rows = table.row_count(), "downloaded");

        if table.is_empty() {
            return Ok(self.chart_service.empty_result(symbol, name, start, end));
        }

        let table = table.normalize_columns()?;
        if !table.has_column(CLOSE_FIELD) {
            return Ok(self.chart_service.missing_close_column(symbol, name));
        }

        let series = table.into_series(CLOSE_FIELD)?;
        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) if series.len() >= 2 => (first, last),
            _ => {
                return Ok(self
                    .chart_service
                    .insufficient_rows(symbol, name, series.len()))
            }
        };

        let variation = Variation::between(first.close, last.close);
        if !variation.is_finite() {
            return Err(CoreError::Computation(format!(
                "first closing price on {} is {}",
                first.date, first.close
            )));
        }

        Ok(self.chart_service.success(symbol, name, &series, variation))
    }
}

/// Parse a `YYYY-MM-DD` date, also accepting a trailing `THH:MM:SS` time part.
pub fn parse_date(value: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date())
        })
        .map_err(|e| CoreError::InvalidDate {
            value: value.to_string(),
            reason: e.to_string(),
        })
}
