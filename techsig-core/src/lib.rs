//! techsig core: indicator engine and signal classifier.
//!
//! This crate turns one instrument's OHLCV series into:
//! - Indicator rows (SMA 20/50, EMA 12/26, MACD, Bollinger 20/2, RSI 14),
//!   one per bar, with `None` wherever the trailing window is not yet full
//! - A signal report for the last row (RSI, MACD, Bollinger, SMA trend)
//!
//! Providers behind the `DataProvider` trait (CSV files, a synthetic walk)
//! supply validated series. Every computation is a pure batch pass; nothing
//! is cached between calls.

pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod signals;

pub use analysis::{analyze, Analysis};
pub use config::{AnalysisConfig, ConfigError};
pub use domain::{PriceBar, PriceSeries};
pub use engine::{IndicatorEngine, IndicatorRow};
pub use signals::{SignalClassifier, SignalReport, SignalThresholds};
