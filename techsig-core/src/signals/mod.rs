//! Signal classification over computed indicator rows.

pub mod classifier;
pub mod report;

pub use classifier::{SignalClassifier, SignalThresholds};
pub use report::{
    BollingerReading, BollingerSignal, MacdReading, MacdSignal, RsiReading, RsiSignal,
    SignalReport, TrendReading, TrendSignal, UnavailableReason,
};
