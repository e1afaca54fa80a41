use thiserror::Error;

/// Unified error type for the entire index-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// The update pipeline never returns these to its caller: they are
/// collapsed into the processing-error outcome with `to_string()` as the
/// user-facing message.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    // ── Input ───────────────────────────────────────────────────────
    #[error("Unknown index symbol: {0}")]
    UnknownIndex(String),

    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidSetting { key: String, message: String },

    // ── Data processing ─────────────────────────────────────────────
    #[error("Malformed price table: {0}")]
    MalformedTable(String),

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("Cannot compute variation: {0}")]
    Computation(String),
}
