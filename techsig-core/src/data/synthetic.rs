//! Synthetic random-walk provider for demos and tests.
//!
//! Produces a simple random walk from a starting price of 100.0, weekdays
//! only. The RNG is seeded from the BLAKE3 hash of the symbol, so the same
//! symbol and range always produce the same series.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::provider::{is_valid_symbol, DataError, DataProvider, DataSource};
use crate::domain::{PriceBar, PriceSeries};

#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    start_price: f64,
    max_daily_move: f64,
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self {
            start_price: 100.0,
            max_daily_move: 0.03,
        }
    }

    fn generate(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<PriceBar> {
        // Deterministic seed from symbol name
        let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let mut bars = Vec::new();
        let mut price = self.start_price;

        for date in start.iter_days().take_while(|d| *d <= end) {
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }
            let timestamp = date.and_time(NaiveTime::MIN);

            let daily_return: f64 = rng.gen_range(-self.max_daily_move..self.max_daily_move);
            let open = price;
            let close = price * (1.0 + daily_return);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(500_000..5_000_000u64);

            bars.push(PriceBar {
                timestamp,
                open,
                high,
                low,
                close,
                volume,
            });
            price = close;
        }

        bars
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn source(&self) -> DataSource {
        DataSource::Synthetic
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        if !is_valid_symbol(symbol) {
            return Err(DataError::InvalidSymbol {
                symbol: symbol.to_string(),
            });
        }

        let bars = self.generate(symbol, start, end);
        if bars.is_empty() {
            return Err(DataError::Empty {
                symbol: symbol.to_string(),
                start,
                end,
            });
        }

        info!(symbol, bars = bars.len(), "generated synthetic series");
        Ok(PriceSeries::new(symbol, bars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::validate_bars;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn skips_weekends() {
        // 2024-01-06/07 is a weekend
        let series = SyntheticProvider::new()
            .fetch("SPY", d(2024, 1, 1), d(2024, 1, 14))
            .unwrap();
        assert_eq!(series.len(), 10);
        for bar in series.bars() {
            assert!(!matches!(bar.timestamp.weekday(), Weekday::Sat | Weekday::Sun));
        }
    }

    #[test]
    fn deterministic_per_symbol() {
        let provider = SyntheticProvider::new();
        let a = provider.fetch("SPY", d(2024, 1, 1), d(2024, 3, 1)).unwrap();
        let b = provider.fetch("SPY", d(2024, 1, 1), d(2024, 3, 1)).unwrap();
        let c = provider.fetch("QQQ", d(2024, 1, 1), d(2024, 3, 1)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.closes(), c.closes());
    }

    #[test]
    fn output_is_valid() {
        let series = SyntheticProvider::new()
            .fetch("AAPL", d(2023, 1, 1), d(2023, 12, 31))
            .unwrap();
        assert!(validate_bars(series.bars()).is_ok());
        assert!(series.bars().iter().all(|b| b.is_sane()));
    }

    #[test]
    fn weekend_only_range_is_empty() {
        let result = SyntheticProvider::new().fetch("SPY", d(2024, 1, 6), d(2024, 1, 7));
        assert!(matches!(result, Err(DataError::Empty { .. })));
    }
}
