use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Name of the closing-price field in a downloaded table.
pub const CLOSE_FIELD: &str = "Close";

/// A single closing-price data point (date → close).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// How the data source should lay out the columns of a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupBy {
    /// Flat field columns: `Open`, `Close`, ...
    Column,
    /// Two-tier columns with the symbol as outer tier: `(^GSPC, Close)`, ...
    Symbol,
}

/// A column label, either a plain field name or a (symbol, field) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKey {
    Flat(String),
    Tiered { outer: String, inner: String },
}

impl ColumnKey {
    pub fn flat(field: impl Into<String>) -> Self {
        ColumnKey::Flat(field.into())
    }

    pub fn tiered(outer: impl Into<String>, inner: impl Into<String>) -> Self {
        ColumnKey::Tiered {
            outer: outer.into(),
            inner: inner.into(),
        }
    }

    pub fn is_tiered(&self) -> bool {
        matches!(self, ColumnKey::Tiered { .. })
    }

    /// `true` if this is a flat column with exactly this field name.
    /// Tiered columns never match; drop the outer tier first.
    pub fn is_field(&self, name: &str) -> bool {
        matches!(self, ColumnKey::Flat(field) if field == name)
    }
}

/// Tabular answer of a history provider: one row per trading date.
///
/// `values[row][col]` is the cell for `index[row]` and `columns[col]`.
/// Rows are kept in the order the provider returned them (chronological);
/// nothing here re-sorts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    pub index: Vec<NaiveDate>,
    pub columns: Vec<ColumnKey>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl PriceTable {
    pub fn new(
        index: Vec<NaiveDate>,
        columns: Vec<ColumnKey>,
        values: Vec<Vec<Option<f64>>>,
    ) -> Self {
        Self {
            index,
            columns,
            values,
        }
    }

    /// A table with the given columns and no rows.
    pub fn empty(columns: Vec<ColumnKey>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    /// A table is empty when it has no rows, whatever its columns.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn has_tiered_columns(&self) -> bool {
        self.columns.iter().any(ColumnKey::is_tiered)
    }

    /// Replace every `(outer, inner)` column label with `inner`.
    ///
    /// Fails if flat and tiered labels are mixed, since the result would no
    /// longer have a single column level.
    pub fn drop_outer_tier(self) -> Result<Self, CoreError> {
        if self.columns.iter().any(|c| !c.is_tiered()) {
            return Err(CoreError::MalformedTable(
                "cannot drop a column level: flat and tiered columns are mixed".into(),
            ));
        }

        let columns = self
            .columns
            .into_iter()
            .map(|c| match c {
                ColumnKey::Tiered { inner, .. } => ColumnKey::Flat(inner),
                flat => flat,
            })
            .collect();

        Ok(Self { columns, ..self })
    }

    /// Drop the outer tier only if the table actually has tiered columns.
    pub fn normalize_columns(self) -> Result<Self, CoreError> {
        if self.has_tiered_columns() {
            self.drop_outer_tier()
        } else {
            Ok(self)
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.is_field(name))
    }

    /// Extract one flat column. Checks that every row is as wide as the header.
    pub fn column(&self, name: &str) -> Result<Vec<Option<f64>>, CoreError> {
        let col = self
            .columns
            .iter()
            .position(|c| c.is_field(name))
            .ok_or_else(|| CoreError::MissingColumn(name.to_string()))?;

        if self.values.len() != self.index.len() {
            return Err(CoreError::MalformedTable(format!(
                "{} index entries but {} value rows",
                self.index.len(),
                self.values.len()
            )));
        }

        self.values
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                cells.get(col).copied().ok_or_else(|| {
                    CoreError::MalformedTable(format!(
                        "row {row} has {} cells, expected {}",
                        cells.len(),
                        self.columns.len()
                    ))
                })
            })
            .collect()
    }

    /// Turn the date index into an explicit field of each point.
    ///
    /// Rows with a missing value in `field` are dropped; row order is kept.
    pub fn into_series(self, field: &str) -> Result<Vec<PricePoint>, CoreError> {
        let column = self.column(field)?;
        Ok(self
            .index
            .into_iter()
            .zip(column)
            .filter_map(|(date, close)| close.map(|close| PricePoint { date, close }))
            .collect())
    }
}
