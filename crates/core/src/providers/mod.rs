pub mod traits;

// Data source implementations
pub mod yahoo_finance;
