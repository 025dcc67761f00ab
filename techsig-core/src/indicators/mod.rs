//! Concrete indicator implementations.
//!
//! Every indicator implements the [`Indicator`] trait. Multi-series indicators
//! (MACD, Bollinger) are exposed as separate named instances per line, and as
//! one set that emits every line from a single pass. Each module also exports a
//! `*_of_series` function over `&[Option<f64>]` for composition.

pub mod bollinger;
pub mod ema;
pub mod indicator;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::{bollinger_of_series, Bands, Bollinger, BollingerBand, BollingerBands};
pub use ema::{ema_of_series, Ema};
pub use indicator::{precompute_indicators, Indicator, IndicatorValues};
pub use macd::{macd_of_series, Macd, MacdLine, MacdLines, MacdPoint};
pub use rsi::{rsi_of_series, Rsi};
pub use sma::{rolling_mean, Sma};

use crate::domain::PriceBar;

/// Close prices as an indicator input column; non-finite closes become `None`.
pub fn closes_of(bars: &[PriceBar]) -> Vec<Option<f64>> {
    bars.iter()
        .map(|b| Some(b.close).filter(|c| c.is_finite()))
        .collect()
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<PriceBar> {
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                timestamp: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
