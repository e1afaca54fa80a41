use serde::{Deserialize, Serialize};

use super::chart::ChartSpec;

/// Percentage change between the first and last close of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variation(f64);

impl Variation {
    /// `(last - first) / first * 100`.
    ///
    /// A zero `first` close yields an infinite or NaN variation; callers
    /// are expected to check with [`Variation::is_finite`].
    pub fn between(first: f64, last: f64) -> Self {
        Self((last - first) / first * 100.0)
    }

    pub fn percent(&self) -> f64 {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Strictly positive. A flat series (exactly 0) is reported as a decrease.
    pub fn is_increase(&self) -> bool {
        self.0 > 0.0
    }

    pub fn direction(&self) -> &'static str {
        if self.is_increase() {
            "increased"
        } else {
            "decreased"
        }
    }

    /// `"increased by 10.00%"` / `"decreased by 10.00%"` (absolute value, two decimals).
    pub fn describe(&self) -> String {
        format!("{} by {:.2}%", self.direction(), self.0.abs())
    }
}

/// Which of the mutually exclusive result shapes an update produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The data source returned no rows.
    EmptyResult,
    /// Rows were returned but none carry a closing price.
    MissingCloseColumn,
    /// Fewer than two rows with a closing price.
    InsufficientRows { rows: usize },
    Success { variation: Variation },
    /// Any failure during lookup, fetch, or normalization.
    ProcessingError { message: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

/// Everything the page needs to render one update: the chart and the text below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResult {
    pub symbol: String,
    pub outcome: Outcome,
    pub chart: ChartSpec,

    /// User-facing explanation. May contain `**` emphasis markup.
    pub explanation: String,
}
