// =============================================================================
// Shared signal types used across the analysis engine
// =============================================================================

use serde::{Deserialize, Serialize};

/// Crossover verdict of the short SMA against the long SMA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmaSignal {
    Buy,
    Sell,
}

impl SmaSignal {
    /// A short SMA strictly above the long SMA is a buy; anything else sells.
    pub fn from_averages(short_sma: f64, long_sma: f64) -> Self {
        if short_sma > long_sma {
            Self::Buy
        } else {
            Self::Sell
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Buy => "Buy signal: short-term SMA is above long-term SMA",
            Self::Sell => "Sell signal: short-term SMA is not above long-term SMA",
        }
    }
}

impl std::fmt::Display for SmaSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "Buy"),
            Self::Sell => write!(f, "Sell"),
        }
    }
}

/// Oversold / overbought reading of the RSI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiSignal {
    Buy,
    Sell,
    Neutral,
}

impl RsiSignal {
    /// `rsi < oversold` buys, `rsi > overbought` sells, the band between is neutral.
    pub fn from_rsi(rsi: f64, oversold: f64, overbought: f64) -> Self {
        if rsi < oversold {
            Self::Buy
        } else if rsi > overbought {
            Self::Sell
        } else {
            Self::Neutral
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Buy => "Buy signal: RSI indicates oversold conditions",
            Self::Sell => "Sell signal: RSI indicates overbought conditions",
            Self::Neutral => "Neutral: RSI is balanced",
        }
    }
}

impl std::fmt::Display for RsiSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "Buy"),
            Self::Sell => write!(f, "Sell"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Sign of the N-bar momentum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MomentumSignal {
    Positive,
    Negative,
    Neutral,
}

impl MomentumSignal {
    pub fn from_momentum(momentum: f64) -> Self {
        if momentum > 0.0 {
            Self::Positive
        } else if momentum < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Positive => "Positive momentum: price is accelerating upward",
            Self::Negative => "Negative momentum: price is decelerating downward",
            Self::Neutral => "Neutral momentum: price is stable",
        }
    }
}

impl std::fmt::Display for MomentumSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "Positive"),
            Self::Negative => write!(f, "Negative"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Latest volume relative to the series average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeSignal {
    High,
    Low,
}

impl VolumeSignal {
    pub fn from_volumes(latest_volume: u64, average_volume: u64) -> Self {
        if latest_volume > average_volume {
            Self::High
        } else {
            Self::Low
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::High => "High volume near support strengthens the buy signal",
            Self::Low => "Low volume near resistance weakens the sell signal",
        }
    }
}

impl std::fmt::Display for VolumeSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// Composite recommendation for the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodayDecision {
    Buy,
    Avoid,
    Neutral,
}

impl TodayDecision {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Buy => "Advisable to buy",
            Self::Avoid => "Not advisable to buy",
            Self::Neutral => "Neutral: current price is within the acceptable range",
        }
    }
}

impl std::fmt::Display for TodayDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "Buy"),
            Self::Avoid => write!(f, "Avoid"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Conjunctive trend label produced by the trend classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
    Neutral,
}

impl Trend {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Uptrend => "Uptrend: price is increasing steadily with strong volume",
            Self::Downtrend => "Downtrend: price is decreasing with weakening demand",
            Self::Neutral => "Neutral: the trend is unclear, monitor further developments",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uptrend => write!(f, "Uptrend"),
            Self::Downtrend => write!(f, "Downtrend"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

// =============================================================================
// Configuration selectors
// =============================================================================

/// How the optimal buy / sell prices are derived from the series extrema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimalPriceRule {
    /// Buy at the 38.2% retracement level, sell at the 61.8% level.
    Retracement,
    /// Buy a fixed percentage above the minimum, sell the same below the maximum.
    PercentOffset,
}

impl Default for OptimalPriceRule {
    fn default() -> Self {
        Self::Retracement
    }
}

impl std::fmt::Display for OptimalPriceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Retracement => write!(f, "retracement"),
            Self::PercentOffset => write!(f, "percent-offset"),
        }
    }
}

/// Thresholds the latest close is compared against for the today decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TodayDecisionRule {
    /// Buy near the minimum, avoid near the maximum.
    PercentOffset,
    /// Buy below the 38.2% level, avoid above the 61.8% level.
    ///
    /// The two bands overlap, so this rule never reports `Neutral`.
    Retracement,
}

impl Default for TodayDecisionRule {
    fn default() -> Self {
        Self::PercentOffset
    }
}

impl std::fmt::Display for TodayDecisionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PercentOffset => write!(f, "percent-offset"),
            Self::Retracement => write!(f, "retracement"),
        }
    }
}

/// Which closing-price sequence feeds the price indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceBasis {
    Daily,
    /// Five consecutive daily closes averaged into one price.
    Weekly,
}

impl Default for PriceBasis {
    fn default() -> Self {
        Self::Daily
    }
}

impl std::fmt::Display for PriceBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
        }
    }
}
