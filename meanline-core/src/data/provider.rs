//! Data provider trait and structured error types.
//!
//! Abstracts over market-data sources so the CLI can swap the live HTTP
//! provider for canned bars in tests.

use crate::domain::DailyBar;
use chrono::NaiveDate;
use thiserror::Error;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status} from provider")]
    Http { status: u16 },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("no quotes for symbol '{code}'")]
    SymbolNotFound { code: String },

    #[error("no trading days for '{code}' between {start} and {end}")]
    EmptyRange {
        code: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("validation error: {0}")]
    Validation(String),
}

/// Trait for market-data providers.
///
/// Implementations handle the specifics of one source. Returned bars are
/// sorted ascending by date; validation beyond parsing is the caller's job
/// (see `validate_bars`).
pub trait BarProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily bars for a symbol over an inclusive date range.
    fn fetch(
        &self,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, DataError>;
}
