use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::price::{PricePoint, CLOSE_FIELD};

/// Field name the chart uses for its x axis.
pub const DATE_FIELD: &str = "Date";

/// A single point of the closing-price line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl From<&PricePoint> for ChartDataPoint {
    fn from(p: &PricePoint) -> Self {
        Self {
            date: p.date,
            close: p.close,
        }
    }
}

/// Description of the chart shown on the page.
///
/// The core decides what to draw; the page's charting library only renders it.
/// A chart with no points is rendered as an empty frame carrying the title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,

    /// Label of the x axis ("Date")
    pub x_field: String,

    /// Label of the y axis ("Close")
    pub y_field: String,

    pub points: Vec<ChartDataPoint>,
}

impl ChartSpec {
    /// An empty chart that only carries a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self::line(&[], title)
    }

    /// A closing price vs. date line chart.
    pub fn line(points: &[PricePoint], title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_field: DATE_FIELD.to_string(),
            y_field: CLOSE_FIELD.to_string(),
            points: points.iter().map(ChartDataPoint::from).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
