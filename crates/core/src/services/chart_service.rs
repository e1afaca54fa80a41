use crate::models::chart::ChartSpec;
use crate::models::outcome::{Outcome, UpdateResult, Variation};
use crate::models::price::PricePoint;

/// Generates the chart and explanation text for each update outcome.
///
/// The core composes every user-visible string; the page only renders.
/// Names, the Close field and error messages are wrapped in `**` emphasis.
#[derive(Debug, Default)]
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// No rows for the requested range. `start`/`end` are echoed verbatim.
    pub fn empty_result(&self, symbol: &str, name: &str, start: &str, end: &str) -> UpdateResult {
        UpdateResult {
            symbol: symbol.to_string(),
            outcome: Outcome::EmptyResult,
            chart: ChartSpec::titled(format!("No data for {name}")),
            explanation: format!(
                "No data could be retrieved for **{name}** between {start} and {end}."
            ),
        }
    }

    pub fn missing_close_column(&self, symbol: &str, name: &str) -> UpdateResult {
        UpdateResult {
            symbol: symbol.to_string(),
            outcome: Outcome::MissingCloseColumn,
            chart: ChartSpec::titled(format!("'Close' column not found for {name}")),
            explanation: "The **Close** column is missing from the downloaded data.".to_string(),
        }
    }

    pub fn insufficient_rows(&self, symbol: &str, name: &str, rows: usize) -> UpdateResult {
        UpdateResult {
            symbol: symbol.to_string(),
            outcome: Outcome::InsufficientRows { rows },
            chart: ChartSpec::titled(format!("Not enough data for {name}")),
            explanation: format!(
                "There is not enough data to compute the variation for **{name}**."
            ),
        }
    }

    /// Closing price line plus the first-to-last variation.
    pub fn success(
        &self,
        symbol: &str,
        name: &str,
        points: &[PricePoint],
        variation: Variation,
    ) -> UpdateResult {
        UpdateResult {
            symbol: symbol.to_string(),
            outcome: Outcome::Success { variation },
            chart: ChartSpec::line(points, format!("Evolution of {name}")),
            explanation: format!(
                "The **{name}** index {} over this period.",
                variation.describe()
            ),
        }
    }

    /// Catch-all for any failure; `message` is embedded verbatim.
    pub fn processing_error(&self, symbol: &str, message: &str) -> UpdateResult {
        UpdateResult {
            symbol: symbol.to_string(),
            outcome: Outcome::ProcessingError {
                message: message.to_string(),
            },
            chart: ChartSpec::titled("Error during download or processing"),
            explanation: format!("An error occurred: **{message}**"),
        }
    }
}
