//! Relative Strength Index (RSI).
//!
//! Uses trailing SIMPLE means of gains and losses, not Wilder smoothing.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period (the first change exists at index 1).
//! Edge cases: avg_loss == 0 with avg_gain > 0 → 100; both zero → no value.

use super::closes_of;
use super::indicator::Indicator;
use super::sma::rolling_mean;
use crate::domain::PriceBar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        rsi_of_series(&closes_of(bars), self.period)
    }
}

/// RSI over an arbitrary series of closes.
pub fn rsi_of_series(closes: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let n = closes.len();
    let mut gains = vec![None; n];
    let mut losses = vec![None; n];

    for i in 1..n {
        if let (Some(curr), Some(prev)) = (closes[i], closes[i - 1]) {
            let change = curr - prev;
            if change.is_finite() {
                gains[i] = Some(if change > 0.0 { change } else { 0.0 });
                losses[i] = Some(if change < 0.0 { -change } else { 0.0 });
            }
        }
    }

    let avg_gains = rolling_mean(&gains, period);
    let avg_losses = rolling_mean(&losses, period);

    avg_gains
        .into_iter()
        .zip(avg_losses)
        .map(|(gain, loss)| compute_rsi(gain?, loss?))
        .collect()
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        // No losses: saturate on any gain, undefined on a flat window
        if avg_gain > 0.0 {
            Some(100.0)
        } else {
            None
        }
    } else {
        Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
    }
}
