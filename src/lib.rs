// =============================================================================
// Technical indicator analysis engine
// =============================================================================
//
// Turns a validated OHLCV series into an `AnalysisReport`: moving averages,
// RSI, Fibonacci retracement, candlestick patterns, trend, momentum and a
// composite decision for the latest bar.  The engine is a pure function of
// its input series and an `AnalysisConfig`; it performs no I/O beyond the
// optional file helpers in `market_data::loader` and `runtime_config`.

pub mod analysis;
pub mod error;
pub mod indicators;
pub mod market_data;
pub mod patterns;
pub mod runtime_config;
pub mod trend;
pub mod types;

pub use analysis::{AnalysisEnvelope, AnalysisReport, SignalAggregator};
pub use error::AnalysisError;
pub use market_data::{Bar, RawBar, TimeSeries};
pub use runtime_config::AnalysisConfig;
