//! Indicator trait and precomputed indicator values container.
//!
//! Indicators are pure functions: bar history in, numeric series out.
//! Every column is computed once per engine pass and then read by row index.

use crate::domain::PriceBar;
use std::collections::HashMap;

/// Trait for indicators.
///
/// Indicators take a full bar series and produce an output series of the same
/// length. Rows without enough trailing history hold `None`.
///
/// # Look-ahead contamination guard
/// No indicator value at bar t may depend on price data from bar t+1 or later.
/// Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Column name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of leading rows that are always `None` on clean input.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    ///
    /// Returns a `Vec` of the same length as `bars`.
    fn compute(&self, bars: &[PriceBar]) -> Vec<Option<f64>>;

    /// Every named column this indicator produces, from one computation.
    ///
    /// Multi-line indicators override this to emit all their lines at once.
    fn columns(&self, bars: &[PriceBar]) -> Vec<(String, Vec<Option<f64>>)> {
        vec![(self.name().to_string(), self.compute(bars))]
    }
}

/// Container for precomputed indicator columns, keyed by indicator name.
#[derive(Debug, Clone, Default)]
pub struct IndicatorValues {
    series: HashMap<String, Vec<Option<f64>>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named indicator series.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) {
        self.series.insert(name.into(), values);
    }

    /// Value of a column at a row. `None` when the column is unknown, the row
    /// is out of bounds, or the value itself is absent.
    pub fn get(&self, name: &str, row: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(row).copied())
            .flatten()
    }

    /// Get the full series for a named indicator.
    pub fn get_series(&self, name: &str) -> Option<&[Option<f64>]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    /// Number of indicator series stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Compute every indicator over `bars` into one container.
pub fn precompute_indicators(
    bars: &[PriceBar],
    indicators: &[Box<dyn Indicator>],
) -> IndicatorValues {
    let mut values = IndicatorValues::new();
    for indicator in indicators {
        for (name, series) in indicator.columns(bars) {
            debug_assert_eq!(
                series.len(),
                bars.len(),
                "column '{name}' produced {} values for {} bars",
                series.len(),
                bars.len()
            );
            values.insert(name, series);
        }
    }
    values
}
