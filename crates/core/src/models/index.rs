use serde::{Deserialize, Serialize};

/// A stock-market index the dashboard can chart (e.g., `^GSPC` → "S&P 500").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketIndex {
    /// Ticker-like symbol understood by the history provider
    pub symbol: String,

    /// Human-readable name used in chart titles and explanations
    pub name: String,
}

impl MarketIndex {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// The symbol selected when the page first loads.
pub const DEFAULT_SYMBOL: &str = "^GSPC";

const BUILTIN_INDICES: [(&str, &str); 10] = [
    ("^DJI", "Dow Jones"),
    ("^IXIC", "Nasdaq"),
    ("^GSPC", "S&P 500"),
    ("^FTSE", "FTSE 100"),
    ("^GDAXI", "DAX"),
    ("^FCHI", "CAC 40"),
    ("^N225", "Nikkei 225"),
    ("000001.SS", "Shanghai Composite"),
    ("^BSESN", "Sensex"),
    ("^STOXX50E", "Euro Stoxx 50"),
];

/// Fixed, read-only mapping from index symbol to display name.
///
/// Built once at startup. Lookups return `Option` so a symbol that is not
/// registered is handled at every use site instead of panicking.
/// Symbols are matched exactly (case-sensitive).
#[derive(Debug, Clone)]
pub struct IndexRegistry {
    indices: Vec<MarketIndex>,
}

impl IndexRegistry {
    /// The ten indices offered by the dashboard selector, in display order.
    pub fn builtin() -> Self {
        Self {
            indices: BUILTIN_INDICES
                .iter()
                .map(|(symbol, name)| MarketIndex::new(*symbol, *name))
                .collect(),
        }
    }

    /// Build a registry from an explicit list. Later duplicates of a symbol are ignored.
    pub fn from_indices(indices: impl IntoIterator<Item = MarketIndex>) -> Self {
        let mut unique: Vec<MarketIndex> = Vec::new();
        for index in indices {
            if !unique.iter().any(|i| i.symbol == index.symbol) {
                unique.push(index);
            }
        }
        Self { indices: unique }
    }

    pub fn lookup(&self, symbol: &str) -> Option<&MarketIndex> {
        self.indices.iter().find(|i| i.symbol == symbol)
    }

    pub fn display_name(&self, symbol: &str) -> Option<&str> {
        self.lookup(symbol).map(|i| i.name.as_str())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.lookup(symbol).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarketIndex> {
        self.indices.iter()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl Default for IndexRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
