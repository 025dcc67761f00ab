//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! Three bands, as separate Indicator instances or together as [`BollingerBands`]:
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//!
//! Uses sample stddev (divide by N - 1), so period must be at least 2.
//! Lookback: period - 1.

use serde::{Deserialize, Serialize};

use super::closes_of;
use super::indicator::Indicator;
use super::sma::rolling_mean;
use crate::domain::PriceBar;

/// Which band of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

/// All three bands at one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl Bands {
    fn pick(&self, band: BollingerBand) -> f64 {
        match band {
            BollingerBand::Upper => self.upper,
            BollingerBand::Middle => self.middle,
            BollingerBand::Lower => self.lower,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Upper, "upper")
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Middle, "middle")
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Lower, "lower")
    }

    fn with_band(period: usize, multiplier: f64, band: BollingerBand, label: &str) -> Self {
        assert!(period >= 2, "Bollinger period must be >= 2");
        Self {
            period,
            multiplier,
            band,
            name: band_name(label, period, multiplier),
        }
    }
}

fn band_name(label: &str, period: usize, multiplier: f64) -> String {
    format!("bollinger_{label}_{period}_{multiplier}")
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        bollinger_of_series(&closes_of(bars), self.period, self.multiplier)
            .into_iter()
            .map(|bands| bands.map(|b| b.pick(self.band)))
            .collect()
    }
}

/// All three bands from a single pass, emitted under the per-band column names.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    multiplier: f64,
    name: String,
}

impl BollingerBands {
    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period >= 2, "Bollinger period must be >= 2");
        Self {
            period,
            multiplier,
            name: format!("bollinger_{period}_{multiplier}"),
        }
    }
}

impl Indicator for BollingerBands {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    /// The middle band.
    fn compute(&self, bars: &[PriceBar]) -> Vec<Option<f64>> {
        bollinger_of_series(&closes_of(bars), self.period, self.multiplier)
            .into_iter()
            .map(|bands| bands.map(|b| b.middle))
            .collect()
    }

    fn columns(&self, bars: &[PriceBar]) -> Vec<(String, Vec<Option<f64>>)> {
        let bands = bollinger_of_series(&closes_of(bars), self.period, self.multiplier);
        [
            ("upper", BollingerBand::Upper),
            ("middle", BollingerBand::Middle),
            ("lower", BollingerBand::Lower),
        ]
        .into_iter()
        .map(|(label, band)| {
            let series = bands.iter().map(|b| b.map(|b| b.pick(band))).collect();
            (band_name(label, self.period, self.multiplier), series)
        })
        .collect()
    }
}

/// Bollinger Bands over an arbitrary series.
///
/// The middle band reuses the rolling mean, which is exact on a constant
/// window. Deviation is taken around that mean, so a constant window has zero
/// width and all three bands equal the price.
pub fn bollinger_of_series(
    values: &[Option<f64>],
    period: usize,
    multiplier: f64,
) -> Vec<Option<Bands>> {
    if period < 2 {
        return vec![None; values.len()];
    }

    let means = rolling_mean(values, period);

    means
        .iter()
        .enumerate()
        .map(|(i, mean)| {
            let mean = (*mean)?;
            let window = &values[i + 1 - period..=i];
            let sum_sq: f64 = window
                .iter()
                .map(|v| {
                    let diff = v.unwrap_or(mean) - mean;
                    diff * diff
                })
                .sum();
            let stddev = (sum_sq / (period - 1) as f64).sqrt();
            Some(Bands {
                upper: mean + multiplier * stddev,
                middle: mean,
                lower: mean - multiplier * stddev,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn bollinger_middle_is_sma() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let result = Bollinger::middle(3, 2.0).compute(&bars);

        assert!(result[0].is_none());
        assert!(result[1].is_none());
        assert_approx(result[2].unwrap(), 11.0, DEFAULT_EPSILON);
        assert_approx(result[3].unwrap(), 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_uses_sample_stddev() {
        // Window [10, 11, 12]: mean 11, sample variance (1 + 0 + 1) / 2 = 1
        let bars = make_bars(&[10.0, 11.0, 12.0]);
        let upper = Bollinger::upper(3, 2.0).compute(&bars);
        let lower = Bollinger::lower(3, 2.0).compute(&bars);
        assert_approx(upper[2].unwrap(), 13.0, DEFAULT_EPSILON);
        assert_approx(lower[2].unwrap(), 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_bands_symmetric() {
        let bars = make_bars(&[10.0, 11.5, 12.25, 13.0, 14.75]);
        let bands = bollinger_of_series(&closes_of(&bars), 3, 2.0);
        for b in bands.iter().skip(2).flatten() {
            assert_approx(b.upper - b.middle, b.middle - b.lower, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn bollinger_constant_price_zero_width() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0]);
        let upper = Bollinger::upper(3, 2.0).compute(&bars);
        let lower = Bollinger::lower(3, 2.0).compute(&bars);

        // Constant price → stddev = 0 → bands collapse to SMA
        assert_eq!(upper[2], Some(100.0));
        assert_eq!(lower[2], Some(100.0));
    }

    #[test]
    fn bollinger_constant_fractional_price_collapses_exactly() {
        for price in [101.37, 0.1, 1234.567] {
            let bands = bollinger_of_series(&[Some(price); 500], 20, 2.0);
            for b in bands.iter().skip(19) {
                assert_eq!(
                    *b,
                    Some(Bands {
                        upper: price,
                        middle: price,
                        lower: price,
                    }),
                    "bands drifted for {price}"
                );
            }
        }
    }

    #[test]
    fn bands_set_matches_single_band_instances() {
        let bars = make_bars(&[10.0, 11.5, 12.25, 13.0, 14.75, 13.5, 12.0]);
        let columns = BollingerBands::new(3, 2.0).columns(&bars);
        let singles = [
            Bollinger::upper(3, 2.0),
            Bollinger::middle(3, 2.0),
            Bollinger::lower(3, 2.0),
        ];
        assert_eq!(columns.len(), 3);
        for ((name, series), single) in columns.iter().zip(&singles) {
            assert_eq!(name, single.name());
            assert_eq!(*series, single.compute(&bars));
        }
    }

    #[test]
    fn bollinger_nan_close_blanks_its_windows() {
        let mut bars = make_bars(&[10.0, 11.0, 12.0, 13.0]);
        bars[2].close = f64::NAN;
        let result = Bollinger::upper(3, 2.0).compute(&bars);
        assert!(result[2].is_none());
        assert!(result[3].is_none()); // window includes NaN bar 2
    }

    #[test]
    fn bollinger_lookback_and_name() {
        let bb = Bollinger::upper(20, 2.0);
        assert_eq!(bb.lookback(), 19);
        assert_eq!(bb.name(), "bollinger_upper_20_2");
    }
}
