// =============================================================================
// Trend Classifier
// =============================================================================
//
// Conjunctive rule set over SMA crossover, RSI and volume:
//
//   UPTREND   - short SMA > long SMA AND RSI < 50 AND latest volume > average
//   DOWNTREND - short SMA < long SMA AND RSI > 50 AND latest volume < average
//   NEUTRAL   - anything else, including partial agreement
//
// There is no score: two out of three conditions still yield NEUTRAL.

use crate::types::Trend;

const RSI_MIDLINE: f64 = 50.0;

/// Inputs to the trend rule, all taken from the latest bar of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendInputs {
    pub short_sma: f64,
    pub long_sma: f64,
    pub rsi: f64,
    pub latest_volume: u64,
    pub average_volume: u64,
}

/// Classify the trend for the given inputs.
pub fn classify(inputs: &TrendInputs) -> Trend {
    let TrendInputs {
        short_sma,
        long_sma,
        rsi,
        latest_volume,
        average_volume,
    } = *inputs;

    if short_sma > long_sma && rsi < RSI_MIDLINE && latest_volume > average_volume {
        Trend::Uptrend
    } else if short_sma < long_sma && rsi > RSI_MIDLINE && latest_volume < average_volume {
        Trend::Downtrend
    } else {
        Trend::Neutral
    }
}
