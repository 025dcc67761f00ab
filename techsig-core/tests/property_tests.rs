//! Property tests for engine and classifier invariants.
//!
//! Uses proptest to verify:
//! 1. Row count and order: one row per bar, bars carried through unchanged
//! 2. Warm-up boundaries: trailing fields absent exactly where history is short
//! 3. Bounds: RSI within [0, 100], Bollinger lower <= middle <= upper
//! 4. No look-ahead: a prefix of the series yields a prefix of the rows
//! 5. Totality: the classifier always returns a label for every category

use chrono::{NaiveDate, NaiveTime};
use proptest::prelude::*;
use techsig_core::signals::{BollingerSignal, MacdSignal, RsiSignal};
use techsig_core::{IndicatorEngine, PriceBar, PriceSeries, SignalClassifier};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1000.0_f64, 0..max_len)
        .prop_map(|v| v.into_iter().map(|p| (p * 100.0).round() / 100.0).collect())
}

fn series_from(closes: &[f64]) -> PriceSeries {
    let base = NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_time(NaiveTime::MIN);
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            timestamp: base + chrono::Duration::hours(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
        })
        .collect();
    PriceSeries::new("PROP", bars)
}

// ── 1-2. Shape and warm-up ───────────────────────────────────────────

proptest! {
    #[test]
    fn one_row_per_bar(closes in arb_closes(120)) {
        let series = series_from(&closes);
        let rows = IndicatorEngine::new().compute(&series);
        prop_assert_eq!(rows.len(), closes.len());
        for (row, bar) in rows.iter().zip(series.bars()) {
            prop_assert_eq!(&row.bar, bar);
        }
    }

    #[test]
    fn warmup_boundaries(closes in arb_closes(120)) {
        let rows = IndicatorEngine::new().compute(&series_from(&closes));
        for (i, row) in rows.iter().enumerate() {
            prop_assert_eq!(row.sma_20.is_some(), i >= 19);
            prop_assert_eq!(row.sma_50.is_some(), i >= 49);
            prop_assert_eq!(row.bb_upper.is_some(), i >= 19);
            prop_assert_eq!(row.bb_lower.is_some(), i >= 19);
            prop_assert!(row.ema_12.is_some());
            prop_assert!(row.ema_26.is_some());
            prop_assert!(row.macd.is_some());
            prop_assert!(row.macd_signal.is_some());
            if i < 14 {
                prop_assert!(row.rsi.is_none());
            }
        }
    }
}

// ── 3. Bounds ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_is_bounded(closes in arb_closes(120)) {
        let rows = IndicatorEngine::new().compute(&series_from(&closes));
        for rsi in rows.iter().filter_map(|r| r.rsi) {
            prop_assert!((0.0..=100.0).contains(&rsi), "rsi out of bounds: {}", rsi);
        }
    }

    #[test]
    fn bollinger_bands_are_ordered(closes in arb_closes(120)) {
        let rows = IndicatorEngine::new().compute(&series_from(&closes));
        for row in &rows {
            if let (Some(l), Some(m), Some(u)) = (row.bb_lower, row.bb_middle, row.bb_upper) {
                prop_assert!(l <= m && m <= u, "bands out of order: {} {} {}", l, m, u);
            }
        }
    }
}

// ── 4. No look-ahead ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn prefix_rows_match(closes in arb_closes(150), cut in 0.0..1.0_f64) {
        let engine = IndicatorEngine::new();
        let n = (closes.len() as f64 * cut) as usize;
        let full = engine.compute(&series_from(&closes));
        let prefix = engine.compute(&series_from(&closes[..n]));
        prop_assert_eq!(&full[..n], &prefix[..]);
    }
}

// ── 5. Classifier totality ───────────────────────────────────────────

proptest! {
    #[test]
    fn classifier_is_total(closes in arb_closes(80)) {
        let rows = IndicatorEngine::new().compute(&series_from(&closes));
        let report = SignalClassifier::default().classify(&rows);

        match rows.last() {
            None => prop_assert!(report.timestamp.is_none()),
            Some(last) => {
                prop_assert_eq!(report.timestamp, Some(last.bar.timestamp));
                prop_assert_eq!(report.rsi.rsi, last.rsi);
                prop_assert!(!matches!(report.macd.signal, MacdSignal::Unavailable(_)));
            }
        }

        if matches!(report.rsi.signal, RsiSignal::Unavailable(_)) {
            prop_assert!(report.rsi.rsi.is_none());
        }
        if !matches!(report.bollinger.signal, BollingerSignal::Unavailable(_)) {
            prop_assert!(rows.len() >= 20);
        }
    }
}
