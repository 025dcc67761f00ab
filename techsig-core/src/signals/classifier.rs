//! Threshold rules that reduce the last indicator row to signals.
//!
//! All comparisons are strict: a value sitting exactly on a threshold or band
//! falls into the middle label (Neutral, WithinBands), and MACD equality is
//! Bearish.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::report::{
    BollingerReading, BollingerSignal, MacdReading, MacdSignal, RsiReading, RsiSignal,
    SignalReport, TrendReading, TrendSignal, UnavailableReason,
};
use crate::engine::IndicatorRow;

const INSUFFICIENT: UnavailableReason = UnavailableReason::InsufficientData;

/// RSI levels separating Overbought / Neutral / Oversold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignalThresholds {
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
        }
    }
}

/// Classifies the final row of an indicator series.
#[derive(Debug, Clone, Default)]
pub struct SignalClassifier {
    thresholds: SignalThresholds,
}

impl SignalClassifier {
    pub fn new(thresholds: SignalThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &SignalThresholds {
        &self.thresholds
    }

    /// Classify the last row. An empty slice yields a report where every
    /// category is unavailable.
    pub fn classify(&self, rows: &[IndicatorRow]) -> SignalReport {
        let Some(last) = rows.last() else {
            debug!("no rows to classify");
            return SignalReport {
                timestamp: None,
                rsi: self.classify_rsi(None),
                macd: classify_macd(None, None),
                bollinger: classify_bollinger(None, None, None),
                trend: classify_trend(None, None),
            };
        };

        SignalReport {
            timestamp: Some(last.bar.timestamp),
            rsi: self.classify_rsi(last.rsi),
            macd: classify_macd(last.macd, last.macd_signal),
            bollinger: classify_bollinger(
                Some(last.bar.close).filter(|c| c.is_finite()),
                last.bb_upper,
                last.bb_lower,
            ),
            trend: classify_trend(last.sma_20, last.sma_50),
        }
    }

    pub fn classify_rsi(&self, rsi: Option<f64>) -> RsiReading {
        let signal = match rsi {
            Some(v) if v > self.thresholds.rsi_overbought => RsiSignal::Overbought,
            Some(v) if v < self.thresholds.rsi_oversold => RsiSignal::Oversold,
            Some(_) => RsiSignal::Neutral,
            None => RsiSignal::Unavailable(INSUFFICIENT),
        };
        RsiReading { signal, rsi }
    }
}

pub fn classify_macd(macd: Option<f64>, macd_signal: Option<f64>) -> MacdReading {
    let difference = macd.zip(macd_signal).map(|(m, s)| m - s);
    let signal = match (macd, macd_signal) {
        (Some(m), Some(s)) if m > s => MacdSignal::Bullish,
        (Some(_), Some(_)) => MacdSignal::Bearish,
        _ => MacdSignal::Unavailable(INSUFFICIENT),
    };
    MacdReading {
        signal,
        macd,
        macd_signal,
        difference,
    }
}

pub fn classify_bollinger(
    close: Option<f64>,
    upper: Option<f64>,
    lower: Option<f64>,
) -> BollingerReading {
    let signal = match (close, upper, lower) {
        (Some(c), Some(u), Some(_)) if c > u => BollingerSignal::AboveUpperBand,
        (Some(c), Some(_), Some(l)) if c < l => BollingerSignal::BelowLowerBand,
        (Some(_), Some(_), Some(_)) => BollingerSignal::WithinBands,
        _ => BollingerSignal::Unavailable(INSUFFICIENT),
    };
    BollingerReading {
        signal,
        close,
        upper,
        lower,
    }
}

pub fn classify_trend(sma_20: Option<f64>, sma_50: Option<f64>) -> TrendReading {
    let spread = sma_20.zip(sma_50).map(|(fast, slow)| fast - slow);
    let signal = match spread {
        Some(s) if s > 0.0 => TrendSignal::Uptrend,
        Some(s) if s < 0.0 => TrendSignal::Downtrend,
        Some(_) => TrendSignal::Flat,
        None => TrendSignal::Unavailable(INSUFFICIENT),
    };
    TrendReading {
        signal,
        sma_20,
        sma_50,
        spread,
    }
}
