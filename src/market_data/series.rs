// =============================================================================
// OHLCV time series
// =============================================================================
//
// `TimeSeries` is the only input the engine accepts.  Construction validates
// every bar once; afterwards the series is read-only and all derived views
// (closes, volumes, weekly closes) are computed on demand.
//
// Validation rules:
//   - at least one bar
//   - dates strictly increasing (no duplicates)
//   - prices finite and positive, low <= {open, close} <= high
//   - volume non-negative (enforced at the raw boundary, `Bar` stores u64)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Number of daily bars averaged into one weekly price.
pub const BARS_PER_WEEK: usize = 5;

/// One time step of the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.open > self.close
    }

    fn validate(&self) -> Result<(), AnalysisError> {
        let prices = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (name, value) in prices {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnalysisError::InvalidSeries(format!(
                    "{}: {name} must be a positive finite price, got {value}",
                    self.date
                )));
            }
        }

        if self.low > self.open.min(self.close) || self.open.max(self.close) > self.high {
            return Err(AnalysisError::InvalidSeries(format!(
                "{}: OHLC out of range (open={}, high={}, low={}, close={})",
                self.date, self.open, self.high, self.low, self.close
            )));
        }

        Ok(())
    }
}

/// Unvalidated bar as handed over by a data provider.
///
/// Volume is signed here so that a negative provider value is reported as an
/// invalid series instead of failing deserialisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl TryFrom<RawBar> for Bar {
    type Error = AnalysisError;

    fn try_from(raw: RawBar) -> Result<Self, Self::Error> {
        let volume = u64::try_from(raw.volume).map_err(|_| {
            AnalysisError::InvalidSeries(format!(
                "{}: volume must be non-negative, got {}",
                raw.date, raw.volume
            ))
        })?;
        Ok(Bar::new(raw.date, raw.open, raw.high, raw.low, raw.close, volume))
    }
}

/// Validated, oldest-first sequence of bars for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl TimeSeries {
    /// Validate `bars` and wrap them into a series.
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, AnalysisError> {
        if bars.is_empty() {
            return Err(AnalysisError::insufficient("time series", 1, 0));
        }

        for bar in &bars {
            bar.validate()?;
        }

        for pair in bars.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            if curr.date == prev.date {
                return Err(AnalysisError::InvalidSeries(format!(
                    "duplicate date {}",
                    curr.date
                )));
            }
            if curr.date < prev.date {
                return Err(AnalysisError::InvalidSeries(format!(
                    "dates not strictly increasing: {} follows {}",
                    curr.date, prev.date
                )));
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    /// Convert and validate raw provider bars.
    pub fn from_raw(symbol: impl Into<String>, raw: Vec<RawBar>) -> Result<Self, AnalysisError> {
        let bars = raw
            .into_iter()
            .map(Bar::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(symbol, bars)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The most recent bar.
    pub fn latest(&self) -> &Bar {
        // Construction guarantees at least one bar.
        &self.bars[self.bars.len() - 1]
    }

    /// The bar before the most recent one, if any.
    pub fn previous(&self) -> Option<&Bar> {
        self.bars.len().checked_sub(2).map(|i| &self.bars[i])
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<u64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Average each run of `BARS_PER_WEEK` closes into one weekly price.
    ///
    /// Runs are aligned to the latest bar so the newest week is always
    /// complete; a leading remainder shorter than a week is dropped.
    pub fn weekly_closes(&self) -> Vec<f64> {
        let skip = self.bars.len() % BARS_PER_WEEK;
        self.bars[skip..]
            .chunks_exact(BARS_PER_WEEK)
            .map(|week| week.iter().map(|b| b.close).sum::<f64>() / BARS_PER_WEEK as f64)
            .collect()
    }
}
