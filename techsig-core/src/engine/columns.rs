//! Standard indicator set and the column names the engine reads back.

use crate::indicators::{BollingerBands, Ema, Indicator, MacdLines, Rsi, Sma};

pub const SMA_FAST_PERIOD: usize = 20;
pub const SMA_SLOW_PERIOD: usize = 50;
pub const EMA_FAST_SPAN: usize = 12;
pub const EMA_SLOW_SPAN: usize = 26;
pub const MACD_SIGNAL_SPAN: usize = 9;
pub const RSI_PERIOD: usize = 14;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_MULTIPLIER: f64 = 2.0;

pub const SMA_20: &str = "sma_20";
pub const SMA_50: &str = "sma_50";
pub const EMA_12: &str = "ema_12";
pub const EMA_26: &str = "ema_26";
pub const MACD: &str = "macd_12_26_9";
pub const MACD_SIGNAL: &str = "macd_signal_12_26_9";
pub const MACD_HISTOGRAM: &str = "macd_histogram_12_26_9";
pub const BB_UPPER: &str = "bollinger_upper_20_2";
pub const BB_LOWER: &str = "bollinger_lower_20_2";
pub const RSI: &str = "rsi_14";

/// The fixed indicator set. MACD and Bollinger each run once and emit all
/// their lines.
///
/// The engine reads the Bollinger middle band from the `sma_20` column.
pub fn standard_indicators() -> Vec<Box<dyn Indicator>> {
    vec![
        Box::new(Sma::new(SMA_FAST_PERIOD)),
        Box::new(Sma::new(SMA_SLOW_PERIOD)),
        Box::new(Ema::new(EMA_FAST_SPAN)),
        Box::new(Ema::new(EMA_SLOW_SPAN)),
        Box::new(MacdLines::new(EMA_FAST_SPAN, EMA_SLOW_SPAN, MACD_SIGNAL_SPAN)),
        Box::new(BollingerBands::new(BOLLINGER_PERIOD, BOLLINGER_MULTIPLIER)),
        Box::new(Rsi::new(RSI_PERIOD)),
    ]
}
