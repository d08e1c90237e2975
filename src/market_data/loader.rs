// =============================================================================
// Series loader - JSON document on disk -> validated TimeSeries
// =============================================================================
//
// Expected shape:
// ```json
// { "symbol": "AAPL",
//   "bars": [ { "date": "2024-01-02", "open": 1.0, "high": 1.0,
//               "low": 1.0, "close": 1.0, "volume": 100 }, ... ] }
// ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::series::{RawBar, TimeSeries};

/// On-disk representation of one instrument's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesDocument {
    pub symbol: String,
    #[serde(default)]
    pub bars: Vec<RawBar>,
}

/// Parse a series document from a JSON string and validate it.
pub fn parse_series(text: &str) -> Result<TimeSeries> {
    let doc: SeriesDocument =
        serde_json::from_str(text).context("failed to parse series JSON")?;
    let symbol = doc.symbol.trim().to_uppercase();

    let series = TimeSeries::from_raw(symbol.clone(), doc.bars)
        .with_context(|| format!("series for {symbol} failed validation"))?;

    Ok(series)
}

/// Read and validate the series document at `path`.
pub fn load_series(path: impl AsRef<Path>) -> Result<TimeSeries> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read series from {}", path.display()))?;

    let series = parse_series(&content)
        .with_context(|| format!("failed to load series from {}", path.display()))?;

    debug!(
        path = %path.display(),
        symbol = %series.symbol(),
        bars = series.len(),
        "series loaded"
    );

    Ok(series)
}
