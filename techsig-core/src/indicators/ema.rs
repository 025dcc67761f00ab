//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (span + 1),
//! evaluated as EMA[t-1] + alpha * (x[t] - EMA[t-1]) so a flat input holds exactly.
//! Seed: EMA[0] = x[0]. Defined from the first row; early rows weigh the seed heavily.
//! Lookback: 0.

use super::closes_of;
use super::indicator::Indicator;
use crate::domain::PriceBar;

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span >= 1, "EMA span must be >= 1");
        Self {
            span,
            name: format!("ema_{span}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        ema_of_series(&closes_of(bars), self.span)
    }
}

/// Compute EMA values over an arbitrary series.
///
/// The recurrence is seeded with the first present value. Rows whose input is
/// absent or non-finite are `None` and leave the running state untouched.
/// Used by MACD for the signal line.
pub fn ema_of_series(values: &[Option<f64>], span: usize) -> Vec<Option<f64>> {
    if span == 0 {
        return vec![None; values.len()];
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev: Option<f64> = None;

    values
        .iter()
        .map(|value| {
            let v = value.filter(|v| v.is_finite())?;
            let ema = match prev {
                Some(p) => p + alpha * (v - p),
                None => v,
            };
            prev = Some(ema);
            Some(ema)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn ema_span_1_equals_close() {
        let bars = make_bars(&[100.0, 200.0, 300.0]);
        let result = Ema::new(1).compute(&bars);
        assert_eq!(result, vec![Some(100.0), Some(200.0), Some(300.0)]);
    }

    #[test]
    fn ema_3_known_values() {
        // Closes: 10, 11, 12, 13
        // alpha = 2/(3+1) = 0.5, seed EMA[0] = 10
        // EMA[1] = 0.5*11 + 0.5*10   = 10.5
        // EMA[2] = 0.5*12 + 0.5*10.5 = 11.25
        // EMA[3] = 0.5*13 + 0.5*11.25 = 12.125
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0]);
        let result = Ema::new(3).compute(&bars);

        assert_approx(result[0].unwrap(), 10.0, DEFAULT_EPSILON);
        assert_approx(result[1].unwrap(), 10.5, DEFAULT_EPSILON);
        assert_approx(result[2].unwrap(), 11.25, DEFAULT_EPSILON);
        assert_approx(result[3].unwrap(), 12.125, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_nan_close_skips_row_and_keeps_state() {
        let mut bars = make_bars(&[10.0, 11.0, 12.0, 13.0]);
        bars[2].close = f64::NAN;
        let result = Ema::new(3).compute(&bars);
        assert_approx(result[1].unwrap(), 10.5, DEFAULT_EPSILON);
        assert!(result[2].is_none());
        // EMA[3] = 0.5*13 + 0.5*10.5
        assert_approx(result[3].unwrap(), 11.75, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_of_series_seeds_on_first_present_value() {
        let result = ema_of_series(&[None, Some(4.0), Some(8.0)], 3);
        assert_eq!(result[0], None);
        assert_eq!(result[1], Some(4.0));
        assert_approx(result[2].unwrap(), 6.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_constant_input_is_exact() {
        for price in [101.37, 0.1, 1234.567] {
            let result = ema_of_series(&[Some(price); 500], 26);
            assert!(result.iter().all(|v| *v == Some(price)), "drift for {price}");
        }
    }

    #[test]
    fn ema_lookback() {
        assert_eq!(Ema::new(26).lookback(), 0);
    }

    #[test]
    fn ema_of_series_matches_indicator() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
        let closes: Vec<Option<f64>> = bars.iter().map(|b| Some(b.close)).collect();
        assert_eq!(Ema::new(3).compute(&bars), ema_of_series(&closes, 3));
    }
}
