//! IndicatorRow: one input bar plus every derived column.

use serde::{Deserialize, Serialize};

use crate::domain::PriceBar;

/// A price bar augmented with the standard indicator set.
///
/// `None` means the trailing window was not yet full (or held a non-finite
/// close); it is never a stand-in for zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    #[serde(flatten)]
    pub bar: PriceBar,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub ema_12: Option<f64>,
    pub ema_26: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub rsi: Option<f64>,
}

impl IndicatorRow {
    /// Header matching [`IndicatorRow::derived_values`] order.
    pub const DERIVED_COLUMNS: [&'static str; 11] = [
        "sma_20",
        "sma_50",
        "ema_12",
        "ema_26",
        "macd",
        "macd_signal",
        "macd_histogram",
        "bb_middle",
        "bb_upper",
        "bb_lower",
        "rsi",
    ];

    /// Derived fields in column order, for tabular export.
    pub fn derived_values(&self) -> [Option<f64>; 11] {
        [
            self.sma_20,
            self.sma_50,
            self.ema_12,
            self.ema_26,
            self.macd,
            self.macd_signal,
            self.macd_histogram,
            self.bb_middle,
            self.bb_upper,
            self.bb_lower,
            self.rsi,
        ]
    }

    /// True when every derived field holds a value.
    pub fn is_complete(&self) -> bool {
        self.derived_values().iter().all(Option::is_some)
    }
}
