//! PriceSeries: an ordered, immutable run of bars for one instrument.

use serde::{Deserialize, Serialize};

use super::bar::PriceBar;

/// Bars for a single symbol, ordered by timestamp ascending.
///
/// Gaps (weekends, holidays, halted sessions) are allowed and never filled.
/// The bar vector is private so a series cannot be mutated once built; the
/// ordering itself is the provider's responsibility (see
/// [`crate::data::validate_bars`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Close prices in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}
