// =============================================================================
// Candlestick Pattern Detection
// =============================================================================
//
// Classifies the latest bar (and the latest pair of bars) of a series.
//
// Single-bar rules (first match wins):
//   1. HAMMER         - close > open AND (high - close) < (close - low) * 0.2
//   2. SHOOTING STAR  - open > close AND (open - high) < (low - close) * 0.2
//   3. DOJI           - |close - open| < (high - low) * 0.1
//
// Two-bar rules (current bar against the previous one):
//   4. BULLISH ENGULFING - open < close AND close > prev.high AND open < prev.low
//   5. BEARISH ENGULFING - open > close AND close < prev.low  AND open > prev.high
//
// The single-bar and two-bar verdicts are reported separately; the combined
// verdict prefers the single-bar match and falls back to the two-bar one.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::market_data::Bar;

const HAMMER_SHADOW_RATIO: f64 = 0.2;
const DOJI_BODY_RATIO: f64 = 0.1;

/// A recognised candlestick pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandlePattern {
    Hammer,
    ShootingStar,
    Doji,
    BullishEngulfing,
    BearishEngulfing,
    NoPattern,
}

impl CandlePattern {
    /// Fixed advisory text for the pattern.
    pub fn advice(self) -> &'static str {
        match self {
            Self::Hammer => "potential upward reversal, confirm with volume",
            Self::ShootingStar => "potential downward reversal, avoid new entries",
            Self::Doji => "indecision, wait for confirmation",
            Self::BullishEngulfing => "strong buying pressure",
            Self::BearishEngulfing => "strong selling pressure",
            Self::NoPattern => "no actionable suggestion",
        }
    }

    pub fn is_some(self) -> bool {
        self != Self::NoPattern
    }
}

impl std::fmt::Display for CandlePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hammer => write!(f, "Hammer"),
            Self::ShootingStar => write!(f, "Shooting Star"),
            Self::Doji => write!(f, "Doji"),
            Self::BullishEngulfing => write!(f, "Bullish Engulfing"),
            Self::BearishEngulfing => write!(f, "Bearish Engulfing"),
            Self::NoPattern => write!(f, "no significant pattern"),
        }
    }
}

/// Pattern verdicts for the tail of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternReport {
    /// Fast classification of the latest bar alone.
    pub single_bar: CandlePattern,
    /// Engulfing classification of the latest two bars.
    pub two_bar: CandlePattern,
    /// Single-bar verdict, or the two-bar one when no single-bar rule fired.
    pub combined: CandlePattern,
}

/// Classify one bar on its own.
pub fn classify_single(bar: &Bar) -> CandlePattern {
    if bar.is_bullish()
        && (bar.high - bar.close) < (bar.close - bar.low) * HAMMER_SHADOW_RATIO
    {
        CandlePattern::Hammer
    } else if bar.is_bearish()
        && (bar.open - bar.high) < (bar.low - bar.close) * HAMMER_SHADOW_RATIO
    {
        CandlePattern::ShootingStar
    } else if bar.body() < bar.range() * DOJI_BODY_RATIO {
        CandlePattern::Doji
    } else {
        CandlePattern::NoPattern
    }
}

/// Classify `curr` against the bar before it.
pub fn classify_pair(prev: &Bar, curr: &Bar) -> CandlePattern {
    if curr.is_bullish() && curr.close > prev.high && curr.open < prev.low {
        CandlePattern::BullishEngulfing
    } else if curr.is_bearish() && curr.close < prev.low && curr.open > prev.high {
        CandlePattern::BearishEngulfing
    } else {
        CandlePattern::NoPattern
    }
}

/// Run both classifications over the last bars of `bars`.
///
/// One bar is enough for the single-bar verdict; the two-bar verdict is
/// `NoPattern` until a previous bar exists.
pub fn detect(bars: &[Bar]) -> Result<PatternReport, AnalysisError> {
    let (curr, history) = bars
        .split_last()
        .ok_or_else(|| AnalysisError::insufficient("candlestick patterns", 1, 0))?;

    let single_bar = classify_single(curr);
    let two_bar = history
        .last()
        .map_or(CandlePattern::NoPattern, |prev| classify_pair(prev, curr));

    let combined = if single_bar.is_some() {
        single_bar
    } else {
        two_bar
    };

    Ok(PatternReport {
        single_bar,
        two_bar,
        combined,
    })
}
