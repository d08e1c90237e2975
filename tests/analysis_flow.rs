// End-to-end flow: series file -> loader -> aggregator -> envelope.

use std::io::Write;

use chrono::NaiveDate;
use signal_engine::market_data::{load_series, SeriesDocument};
use signal_engine::patterns::CandlePattern;
use signal_engine::types::{OptimalPriceRule, TodayDecision, Trend};
use signal_engine::{AnalysisConfig, AnalysisEnvelope, AnalysisError, RawBar, SignalAggregator};

fn raw_bars(closes: &[f64]) -> Vec<RawBar> {
    let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| RawBar {
            date: start + chrono::Duration::days(i as i64),
            open: c - 0.5,
            high: c + 0.1,
            low: c - 0.6,
            close: c,
            volume: 1_000 + i as i64,
        })
        .collect()
}

fn write_document(doc: &SeriesDocument) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(doc).unwrap().as_bytes())
        .unwrap();
    file
}

#[test]
fn file_to_envelope() {
    let closes: Vec<f64> = (1..=12).map(|x| 100.0 + x as f64).collect();
    let file = write_document(&SeriesDocument {
        symbol: "msft".into(),
        bars: raw_bars(&closes),
    });

    let series = load_series(file.path()).unwrap();
    let report = SignalAggregator::default().analyze(&series).unwrap();

    assert_eq!(report.symbol, "MSFT");
    assert_eq!(report.bars_analyzed, 12);
    assert!((report.latest_close - 112.0).abs() < 1e-10);
    assert!((report.rsi - 100.0).abs() < 1e-10);
    // Every bar closes 0.1 under its high with a 0.6 lower shadow: hammer.
    assert_eq!(report.candlestick_pattern, CandlePattern::Hammer);
    assert_eq!(report.single_bar_pattern, CandlePattern::Hammer);
    // Rising volume keeps the latest bar above average, but RSI 100 blocks
    // the uptrend leg.
    assert_eq!(report.trend, Trend::Neutral);
    assert_eq!(report.today_decision, TodayDecision::Avoid);
    assert_eq!(report.optimal_price_rule, OptimalPriceRule::Retracement);

    let envelope = AnalysisEnvelope::new(file.path().display().to_string(), report);
    assert_eq!(envelope.symbol, "MSFT");
    assert_eq!(envelope.id.len(), 36);
    let json = serde_json::to_value(&envelope).unwrap();
    assert_eq!(json["report"]["candlestickPattern"], "Hammer");
    assert_eq!(
        json["report"]["candlestickAdvice"],
        "potential upward reversal, confirm with volume"
    );
}

#[test]
fn short_history_fails_whole_analysis() {
    let file = write_document(&SeriesDocument {
        symbol: "IBM".into(),
        bars: raw_bars(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]),
    });
    let series = load_series(file.path()).unwrap();
    let err = SignalAggregator::default().analyze(&series).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::InsufficientData {
            component: "signal aggregator",
            required: 10,
            available: 6,
        }
    );
}

#[test]
fn invalid_series_never_reaches_the_aggregator() {
    let mut bars = raw_bars(&[10.0; 11]);
    bars[5].date = bars[4].date;
    let file = write_document(&SeriesDocument {
        symbol: "DUP".into(),
        bars,
    });
    let err = load_series(file.path()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AnalysisError>(),
        Some(AnalysisError::InvalidSeries(_))
    ));
}

#[test]
fn aggregator_is_shareable_across_threads() {
    let aggregator = std::sync::Arc::new(
        SignalAggregator::new(AnalysisConfig {
            optimal_price_rule: OptimalPriceRule::PercentOffset,
            ..AnalysisConfig::default()
        })
        .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|k| {
            let aggregator = std::sync::Arc::clone(&aggregator);
            std::thread::spawn(move || {
                let closes: Vec<f64> = (0..20).map(|i| 50.0 + (i * (k + 1)) as f64).collect();
                let series =
                    signal_engine::TimeSeries::from_raw(format!("S{k}"), raw_bars(&closes)).unwrap();
                aggregator.analyze(&series).unwrap()
            })
        })
        .collect();

    for (k, handle) in handles.into_iter().enumerate() {
        let report = handle.join().unwrap();
        assert_eq!(report.symbol, format!("S{k}"));
        assert!((report.optimal_buy_price - 50.0 * 1.05).abs() < 1e-9);
    }
}
