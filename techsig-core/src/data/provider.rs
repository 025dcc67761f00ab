//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over data sources (CSV files, synthetic
//! walks) so the engine never sees where a series came from and tests can
//! swap implementations freely.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PriceSeries;

/// Structured error types for data operations.
///
/// Displayable as-is in CLI output.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("invalid symbol '{symbol}'")]
    InvalidSymbol { symbol: String },

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no bars for '{symbol}' between {start} and {end}")]
    Empty {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    CsvImport,
    Synthetic,
}

/// Trait for data providers.
///
/// A provider either returns a validated [`PriceSeries`] for the symbol and
/// inclusive date range, or reports why it cannot.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Which [`DataSource`] this provider's series come from.
    fn source(&self) -> DataSource;

    /// Fetch OHLCV bars for a symbol over an inclusive date range.
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError>;
}

/// Accepts ticker-like symbols: ASCII alphanumerics plus `.`, `-`, `^`, `=`,
/// and never a path component.
pub fn is_valid_symbol(symbol: &str) -> bool {
    !symbol.is_empty()
        && symbol != "."
        && symbol != ".."
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))
}
