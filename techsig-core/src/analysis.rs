//! One full request: series → indicator rows → signal report.

use serde::Serialize;

use crate::domain::PriceSeries;
use crate::engine::{IndicatorEngine, IndicatorRow};
use crate::signals::{SignalClassifier, SignalReport};

/// Everything the presentation layer needs for one instrument.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub symbol: String,
    pub rows: Vec<IndicatorRow>,
    pub report: SignalReport,
}

impl Analysis {
    /// Close of the classified (last) row.
    pub fn last_close(&self) -> Option<f64> {
        self.rows.last().map(|r| r.bar.close)
    }
}

/// Run the engine then the classifier over `series`.
pub fn analyze(
    series: &PriceSeries,
    engine: &IndicatorEngine,
    classifier: &SignalClassifier,
) -> Analysis {
    let rows = engine.compute(series);
    let report = classifier.classify(&rows);
    Analysis {
        symbol: series.symbol().to_string(),
        rows,
        report,
    }
}
