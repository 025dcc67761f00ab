//! Indicator engine: one batch pass from a price series to indicator rows.
//!
//! Every column is precomputed over the whole series, then rows are assembled
//! by index. Nothing is cached between calls: the same series always yields
//! bit-identical rows.

pub mod columns;
pub mod row;

pub use columns::standard_indicators;
pub use row::IndicatorRow;

use tracing::debug;

use crate::domain::PriceSeries;
use crate::indicators::{precompute_indicators, Indicator};

/// Computes the standard indicator set over a [`PriceSeries`].
pub struct IndicatorEngine {
    indicators: Vec<Box<dyn Indicator>>,
}

impl IndicatorEngine {
    pub fn new() -> Self {
        Self {
            indicators: standard_indicators(),
        }
    }

    /// Rows before every column can hold a value (the longest lookback).
    pub fn warmup(&self) -> usize {
        self.indicators
            .iter()
            .map(|i| i.lookback())
            .max()
            .unwrap_or(0)
    }

    /// One row per bar, same order and count as the input.
    ///
    /// Total: an empty series gives no rows, a short series gives rows whose
    /// trailing fields are `None`.
    pub fn compute(&self, series: &PriceSeries) -> Vec<IndicatorRow> {
        let bars = series.bars();
        debug!(
            symbol = series.symbol(),
            bars = bars.len(),
            indicators = self.indicators.len(),
            "computing indicators"
        );

        let values = precompute_indicators(bars, &self.indicators);

        bars.iter()
            .enumerate()
            .map(|(i, bar)| {
                let sma_20 = values.get(columns::SMA_20, i);
                IndicatorRow {
                    bar: bar.clone(),
                    sma_20,
                    sma_50: values.get(columns::SMA_50, i),
                    ema_12: values.get(columns::EMA_12, i),
                    ema_26: values.get(columns::EMA_26, i),
                    macd: values.get(columns::MACD, i),
                    macd_signal: values.get(columns::MACD_SIGNAL, i),
                    macd_histogram: values.get(columns::MACD_HISTOGRAM, i),
                    bb_middle: sma_20,
                    bb_upper: values.get(columns::BB_UPPER, i),
                    bb_lower: values.get(columns::BB_LOWER, i),
                    rsi: values.get(columns::RSI, i),
                }
            })
            .collect()
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new()
    }
}
