//! Moving Average Convergence/Divergence (MACD).
//!
//! Three lines, as separate Indicator instances or together as [`MacdLines`]:
//! - MACD: EMA(close, fast) - EMA(close, slow)
//! - Signal: EMA(macd, signal)
//! - Histogram: macd - signal
//!
//! All EMAs are seeded with their first input, so every line is defined from
//! row 0. Lookback: 0.

use serde::{Deserialize, Serialize};

use super::closes_of;
use super::ema::ema_of_series;
use super::indicator::Indicator;
use crate::domain::PriceBar;

/// Which MACD line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Macd,
    Signal,
    Histogram,
}

/// All three MACD lines at one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    line: MacdLine,
    name: String,
}

impl Macd {
    pub fn line(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_line(fast, slow, signal, MacdLine::Macd, "macd")
    }

    pub fn signal(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_line(fast, slow, signal, MacdLine::Signal, "macd_signal")
    }

    pub fn histogram(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_line(fast, slow, signal, MacdLine::Histogram, "macd_histogram")
    }

    fn with_line(fast: usize, slow: usize, signal: usize, line: MacdLine, label: &str) -> Self {
        assert!(
            fast >= 1 && slow >= 1 && signal >= 1,
            "MACD spans must be >= 1"
        );
        Self {
            fast,
            slow,
            signal,
            line,
            name: line_name(label, fast, slow, signal),
        }
    }
}

fn line_name(label: &str, fast: usize, slow: usize, signal: usize) -> String {
    format!("{label}_{fast}_{slow}_{signal}")
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        macd_of_series(&closes_of(bars), self.fast, self.slow, self.signal)
            .into_iter()
            .map(|point| {
                point.map(|p| match self.line {
                    MacdLine::Macd => p.macd,
                    MacdLine::Signal => p.signal,
                    MacdLine::Histogram => p.histogram,
                })
            })
            .collect()
    }
}

/// All three MACD lines from a single pass, emitted under the per-line
/// column names.
#[derive(Debug, Clone)]
pub struct MacdLines {
    fast: usize,
    slow: usize,
    signal: usize,
    name: String,
}

impl MacdLines {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(
            fast >= 1 && slow >= 1 && signal >= 1,
            "MACD spans must be >= 1"
        );
        Self {
            fast,
            slow,
            signal,
            name: line_name("macd_lines", fast, slow, signal),
        }
    }
}

impl Indicator for MacdLines {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    /// The MACD line itself.
    fn compute(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        macd_of_series(&closes_of(bars), self.fast, self.slow, self.signal)
            .into_iter()
            .map(|point| point.map(|p| p.macd))
            .collect()
    }

    fn columns(&self, bars: &[PriceBar]) -> Vec<(String, Vec<Option<f64>>)> {
        let points = macd_of_series(&closes_of(bars), self.fast, self.slow, self.signal);
        let pick = |f: fn(&MacdPoint) -> f64| -> Vec<Option<f64>> {
            points.iter().map(|p| p.as_ref().map(f)).collect()
        };
        let (fast, slow, signal) = (self.fast, self.slow, self.signal);
        vec![
            (line_name("macd", fast, slow, signal), pick(|p| p.macd)),
            (line_name("macd_signal", fast, slow, signal), pick(|p| p.signal)),
            (
                line_name("macd_histogram", fast, slow, signal),
                pick(|p| p.histogram),
            ),
        ]
    }
}

/// MACD lines over an arbitrary series.
pub fn macd_of_series(
    values: &[Option<f64>],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Vec<Option<MacdPoint>> {
    let fast_ema = ema_of_series(values, fast);
    let slow_ema = ema_of_series(values, slow);

    let macd: Vec<Option<f64>> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();
    let signal_line = ema_of_series(&macd, signal);

    macd.iter()
        .zip(&signal_line)
        .map(|(m, s)| {
            let (macd, signal) = ((*m)?, (*s)?);
            Some(MacdPoint {
                macd,
                signal,
                histogram: macd - signal,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn lines_set_matches_single_line_instances() {
        let bars = make_bars(&[50.0, 52.0, 51.0, 53.5, 55.0, 54.25, 56.0]);
        let columns = MacdLines::new(3, 5, 2).columns(&bars);
        let singles = [
            Macd::line(3, 5, 2),
            Macd::signal(3, 5, 2),
            Macd::histogram(3, 5, 2),
        ];
        assert_eq!(columns.len(), 3);
        for ((name, series), single) in columns.iter().zip(&singles) {
            assert_eq!(name, single.name());
            assert_eq!(*series, single.compute(&bars));
        }
    }

    #[test]
    fn macd_first_row_is_zero() {
        let bars = make_bars(&[50.0, 52.0, 51.0]);
        let points = macd_of_series(&closes_of(&bars), 12, 26, 9);
        let first = points[0].unwrap();
        assert_eq!(first.macd, 0.0);
        assert_eq!(first.signal, 0.0);
        assert_eq!(first.histogram, 0.0);
    }

    #[test]
    fn macd_known_values() {
        // fast=1 makes the fast EMA equal the close; slow=3 has alpha 0.5.
        // Closes 10, 12: slow EMA[1] = 11 → macd[1] = 1.
        // signal=3: signal[1] = 0.5*1 + 0.5*0 = 0.5 → histogram 0.5.
        let bars = make_bars(&[10.0, 12.0]);
        let points = macd_of_series(&closes_of(&bars), 1, 3, 3);
        let p = points[1].unwrap();
        assert_approx(p.macd, 1.0, DEFAULT_EPSILON);
        assert_approx(p.signal, 0.5, DEFAULT_EPSILON);
        assert_approx(p.histogram, 0.5, DEFAULT_EPSILON);
    }

    #[test]
    fn macd_lines_agree_with_series() {
        let bars = make_bars(&[10.0, 11.0, 10.5, 12.0, 13.5, 12.75, 14.0]);
        let points = macd_of_series(&closes_of(&bars), 3, 5, 2);
        let line = Macd::line(3, 5, 2).compute(&bars);
        let signal = Macd::signal(3, 5, 2).compute(&bars);
        let histogram = Macd::histogram(3, 5, 2).compute(&bars);
        for (i, p) in points.iter().enumerate() {
            let p = p.unwrap();
            assert_eq!(line[i], Some(p.macd));
            assert_eq!(signal[i], Some(p.signal));
            assert_eq!(histogram[i], Some(p.histogram));
            assert_approx(p.histogram, p.macd - p.signal, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn macd_rising_prices_is_positive() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let result = Macd::line(12, 26, 9).compute(&make_bars(&closes));
        assert!(result[1..].iter().all(|v| v.unwrap() > 0.0));
    }

    #[test]
    fn macd_names() {
        assert_eq!(Macd::line(12, 26, 9).name(), "macd_12_26_9");
        assert_eq!(Macd::signal(12, 26, 9).name(), "macd_signal_12_26_9");
        assert_eq!(Macd::histogram(12, 26, 9).name(), "macd_histogram_12_26_9");
    }
}
