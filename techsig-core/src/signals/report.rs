//! Signal labels, their numeric evidence, and the report value object.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a signal could not be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    InsufficientData,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::InsufficientData => f.write_str("insufficient data"),
        }
    }
}

/// Momentum reading from the RSI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiSignal {
    Overbought,
    Oversold,
    Neutral,
    Unavailable(UnavailableReason),
}

/// MACD line position relative to its signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdSignal {
    Bullish,
    Bearish,
    Unavailable(UnavailableReason),
}

/// Close position relative to the Bollinger envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BollingerSignal {
    AboveUpperBand,
    BelowLowerBand,
    WithinBands,
    Unavailable(UnavailableReason),
}

/// Fast SMA position relative to the slow SMA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSignal {
    Uptrend,
    Downtrend,
    Flat,
    Unavailable(UnavailableReason),
}

impl fmt::Display for RsiSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsiSignal::Overbought => f.write_str("overbought"),
            RsiSignal::Oversold => f.write_str("oversold"),
            RsiSignal::Neutral => f.write_str("neutral"),
            RsiSignal::Unavailable(reason) => write!(f, "unavailable ({reason})"),
        }
    }
}

impl fmt::Display for MacdSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacdSignal::Bullish => f.write_str("bullish"),
            MacdSignal::Bearish => f.write_str("bearish"),
            MacdSignal::Unavailable(reason) => write!(f, "unavailable ({reason})"),
        }
    }
}

impl fmt::Display for BollingerSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BollingerSignal::AboveUpperBand => f.write_str("above upper band"),
            BollingerSignal::BelowLowerBand => f.write_str("below lower band"),
            BollingerSignal::WithinBands => f.write_str("within bands"),
            BollingerSignal::Unavailable(reason) => write!(f, "unavailable ({reason})"),
        }
    }
}

impl fmt::Display for TrendSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendSignal::Uptrend => f.write_str("uptrend"),
            TrendSignal::Downtrend => f.write_str("downtrend"),
            TrendSignal::Flat => f.write_str("flat"),
            TrendSignal::Unavailable(reason) => write!(f, "unavailable ({reason})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiReading {
    pub signal: RsiSignal,
    pub rsi: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdReading {
    pub signal: MacdSignal,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    /// `macd - macd_signal`
    pub difference: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerReading {
    pub signal: BollingerSignal,
    pub close: Option<f64>,
    pub upper: Option<f64>,
    pub lower: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendReading {
    pub signal: TrendSignal,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    /// `sma_20 - sma_50`
    pub spread: Option<f64>,
}

/// Independent signals for the last row of an indicator series.
///
/// Categories are independent; no combined verdict is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    /// Timestamp of the classified row; `None` for an empty series.
    pub timestamp: Option<NaiveDateTime>,
    pub rsi: RsiReading,
    pub macd: MacdReading,
    pub bollinger: BollingerReading,
    pub trend: TrendReading,
}
