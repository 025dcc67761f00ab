//! Provider-side validation of bar sequences.
//!
//! The engine assumes well-formed input; providers call [`validate_bars`]
//! before handing a series over.

use super::provider::DataError;
use crate::domain::PriceBar;

/// Reject non-finite prices, inverted high/low, and timestamps that are not
/// strictly increasing.
pub fn validate_bars(bars: &[PriceBar]) -> Result<(), DataError> {
    for (i, bar) in bars.iter().enumerate() {
        if bar.is_void() {
            return Err(DataError::Validation(format!(
                "non-finite price at {}",
                bar.timestamp
            )));
        }
        if bar.high < bar.low {
            return Err(DataError::Validation(format!(
                "high {} below low {} at {}",
                bar.high, bar.low, bar.timestamp
            )));
        }
        if i > 0 && bar.timestamp <= bars[i - 1].timestamp {
            return Err(DataError::Validation(format!(
                "timestamp {} does not follow {}",
                bar.timestamp,
                bars[i - 1].timestamp
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn clean_bars_pass() {
        assert!(validate_bars(&make_bars(&[10.0, 11.0, 12.0])).is_ok());
        assert!(validate_bars(&[]).is_ok());
    }

    #[test]
    fn nan_close_rejected() {
        let mut bars = make_bars(&[10.0, 11.0, 12.0]);
        bars[1].close = f64::NAN;
        let err = validate_bars(&bars).unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn inverted_range_rejected() {
        let mut bars = make_bars(&[10.0, 11.0]);
        bars[1].high = 5.0;
        assert!(matches!(validate_bars(&bars), Err(DataError::Validation(_))));
    }

    #[test]
    fn duplicate_timestamp_rejected() {
        let mut bars = make_bars(&[10.0, 11.0, 12.0]);
        bars[2].timestamp = bars[1].timestamp;
        assert!(validate_bars(&bars).is_err());
    }

    #[test]
    fn backwards_timestamp_rejected() {
        let mut bars = make_bars(&[10.0, 11.0, 12.0]);
        bars.swap(0, 2);
        assert!(validate_bars(&bars).is_err());
    }
}
