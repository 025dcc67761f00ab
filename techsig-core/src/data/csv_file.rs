//! CSV file provider.
//!
//! Layout: `{data_dir}/{SYMBOL}.csv` with header
//! `timestamp,open,high,low,close,volume`. Timestamps are either a date
//! (`2024-01-02`) or a date-time (`2024-01-02 09:30:00` / `2024-01-02T09:30:00`).
//! Rows are sorted ascending, filtered to the requested date range, and
//! validated before a series is returned.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::provider::{is_valid_symbol, DataError, DataProvider, DataSource};
use super::validate::validate_bars;
use crate::domain::{PriceBar, PriceSeries};

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

/// Reads one CSV file per symbol from a directory.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    data_dir: PathBuf,
}

impl CsvProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to the CSV file for a symbol: `{data_dir}/{SYMBOL}.csv`
    pub fn symbol_path(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(format!("{symbol}.csv"))
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn source(&self) -> DataSource {
        DataSource::CsvImport
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        if !is_valid_symbol(symbol) {
            return Err(DataError::InvalidSymbol {
                symbol: symbol.to_string(),
            });
        }

        let path = self.symbol_path(symbol);
        if !path.is_file() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let mut bars = read_bars(&path)?;
        let total = bars.len();
        bars.retain(|b| {
            let date = b.timestamp.date();
            date >= start && date <= end
        });
        if bars.is_empty() {
            warn!(symbol, total, %start, %end, "no bars inside requested range");
            return Err(DataError::Empty {
                symbol: symbol.to_string(),
                start,
                end,
            });
        }

        bars.sort_by_key(|b| b.timestamp);
        validate_bars(&bars)?;

        info!(symbol, bars = bars.len(), path = %path.display(), "loaded csv series");
        Ok(PriceSeries::new(symbol, bars))
    }
}

/// Parse every row of a CSV file into bars, in file order.
pub fn read_bars(path: &Path) -> Result<Vec<PriceBar>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(e, || path.display().to_string()))?;

    let mut bars = Vec::new();
    for (line, record) in reader.deserialize::<CsvRow>().enumerate() {
        // +2: one for the header, one for 1-based numbering
        let row = record.map_err(|e| csv_error(e, || format!("row {}", line + 2)))?;
        let timestamp = parse_timestamp(&row.timestamp).ok_or_else(|| {
            DataError::Parse(format!(
                "row {}: unrecognised timestamp '{}'",
                line + 2,
                row.timestamp
            ))
        })?;
        bars.push(PriceBar {
            timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        });
    }
    Ok(bars)
}

/// I/O failures keep their `io::Error`; everything else is a parse error.
fn csv_error(err: csv::Error, context: impl FnOnce() -> String) -> DataError {
    if !err.is_io_error() {
        return DataError::Parse(format!("{}: {err}", context()));
    }
    match err.into_kind() {
        csv::ErrorKind::Io(io) => DataError::Io(io),
        other => DataError::Parse(format!("{}: {other:?}", context())),
    }
}

/// Parse a date or date-time; bare dates map to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}
