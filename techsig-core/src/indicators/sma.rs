//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices over a lookback window.
//! Lookback: period - 1 (first valid value at index period-1).

use super::indicator::Indicator;
use super::closes_of;
use crate::domain::PriceBar;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        rolling_mean(&closes_of(bars), self.period)
    }
}

/// Trailing mean over `period` values, in a single pass.
///
/// A row is `Some` only when all `period` values ending at it are present and
/// finite. The running sum adds the entering value and drops the leaving one
/// with Neumaier compensation. When the whole window holds one repeated value
/// the mean is exactly that value.
pub fn rolling_mean(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if period == 0 || n < period {
        return result;
    }

    let mut sum = CompensatedSum::default();
    let mut missing = 0usize;
    // Length of the trailing run of present values equal to the latest one
    let mut run = 0usize;

    for i in 0..n {
        let entering = finite(values[i]);
        match entering {
            Some(v) => {
                sum.add(v);
                run = match i.checked_sub(1).and_then(|j| finite(values[j])) {
                    Some(prev) if prev == v => run + 1,
                    _ => 1,
                };
            }
            None => {
                missing += 1;
                run = 0;
            }
        }

        if i >= period {
            match finite(values[i - period]) {
                Some(v) => sum.add(-v),
                None => missing -= 1,
            }
        }

        if i + 1 >= period && missing == 0 {
            result[i] = match entering {
                Some(v) if run >= period => Some(v),
                _ => Some(sum.value() / period as f64),
            };
        }
    }

    result
}

/// Neumaier summation: a running total plus the low-order bits it lost.
#[derive(Debug, Default, Clone, Copy)]
struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.compensation += (self.sum - t) + x;
        } else {
            self.compensation += (x - t) + self.sum;
        }
        self.sum = t;
    }

    fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
