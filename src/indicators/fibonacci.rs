// =============================================================================
// Fibonacci Retracement Levels
// =============================================================================
//
// Heuristic support / resistance prices between the series extrema:
//   diff     = max - min
//   level(r) = max - diff * r      for r in {0.236, 0.382, 0.5, 0.618, 0.786}
//
// A flat series (max == min) collapses every level onto the single price.
//
// Optimal buy / sell prices come from one of two rules:
//   Retracement   => buy = level(0.382), sell = level(0.618)
//   PercentOffset => buy = min * (1 + buy_pct/100), sell = max * (1 - sell_pct/100)

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::types::OptimalPriceRule;

/// Retracement ratios, shallowest first.
pub const RATIOS: [f64; 5] = [0.236, 0.382, 0.5, 0.618, 0.786];

pub const BUY_RATIO: f64 = 0.382;
pub const SELL_RATIO: f64 = 0.618;

/// A single retracement price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetracementLevel {
    pub ratio: f64,
    /// Percentage label, e.g. "38.2%".
    pub label: String,
    pub price: f64,
}

/// Extrema of the series plus every retracement level between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetracementLevels {
    pub max: f64,
    pub min: f64,
    pub levels: Vec<RetracementLevel>,
}

impl RetracementLevels {
    /// Price at `ratio`, if it is one of [`RATIOS`].
    pub fn level(&self, ratio: f64) -> Option<f64> {
        self.levels
            .iter()
            .find(|l| (l.ratio - ratio).abs() < 1e-9)
            .map(|l| l.price)
    }
}

/// Buy / sell price pair chosen by an [`OptimalPriceRule`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalPrices {
    pub buy: f64,
    pub sell: f64,
}

/// Compute retracement levels from the extrema of `prices`.
pub fn levels(prices: &[f64]) -> Result<RetracementLevels, AnalysisError> {
    if prices.is_empty() {
        return Err(AnalysisError::insufficient("fibonacci retracement", 1, 0));
    }

    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let diff = max - min;

    let levels = RATIOS
        .iter()
        .map(|&ratio| RetracementLevel {
            ratio,
            label: format!("{:.1}%", ratio * 100.0),
            price: max - diff * ratio,
        })
        .collect();

    Ok(RetracementLevels { max, min, levels })
}

/// Select the optimal buy / sell prices under `rule`.
pub fn optimal_prices(
    levels: &RetracementLevels,
    rule: OptimalPriceRule,
    buy_offset_pct: f64,
    sell_offset_pct: f64,
) -> OptimalPrices {
    match rule {
        OptimalPriceRule::Retracement => {
            let diff = levels.max - levels.min;
            OptimalPrices {
                buy: levels.max - diff * BUY_RATIO,
                sell: levels.max - diff * SELL_RATIO,
            }
        }
        OptimalPriceRule::PercentOffset => OptimalPrices {
            buy: levels.min * (1.0 + buy_offset_pct / 100.0),
            sell: levels.max * (1.0 - sell_offset_pct / 100.0),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prices_are_insufficient() {
        assert!(matches!(
            levels(&[]),
            Err(AnalysisError::InsufficientData { required: 1, available: 0, .. })
        ));
    }

    #[test]
    fn levels_between_extrema() {
        let fib = levels(&[120.0, 100.0, 200.0, 150.0]).unwrap();
        assert_eq!(fib.max, 200.0);
        assert_eq!(fib.min, 100.0);
        assert_eq!(fib.levels.len(), 5);
        assert!((fib.level(0.236).unwrap() - 176.4).abs() < 1e-9);
        assert!((fib.level(0.786).unwrap() - 121.4).abs() < 1e-9);
        assert!(fib.level(0.9).is_none());
    }

    #[test]
    fn half_level_is_midpoint() {
        let prices = [3.7, 9.1, 4.4, 12.6, 8.8];
        let fib = levels(&prices).unwrap();
        let mid = (fib.max + fib.min) / 2.0;
        assert!((fib.level(0.5).unwrap() - mid).abs() < 1e-10);
    }

    #[test]
    fn labels_are_percentages() {
        let fib = levels(&[1.0, 2.0]).unwrap();
        let labels: Vec<&str> = fib.levels.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["23.6%", "38.2%", "50.0%", "61.8%", "78.6%"]);
    }

    #[test]
    fn flat_series_collapses_levels() {
        let fib = levels(&[10.0; 4]).unwrap();
        for level in &fib.levels {
            assert!((level.price - 10.0).abs() < 1e-10);
        }
    }

    #[test]
    fn retracement_rule_uses_golden_levels() {
        let fib = levels(&[100.0, 200.0]).unwrap();
        let p = optimal_prices(&fib, OptimalPriceRule::Retracement, 5.0, 5.0);
        assert!((p.buy - 161.8).abs() < 1e-9);
        assert!((p.sell - 138.2).abs() < 1e-9);
    }

    #[test]
    fn percent_offset_rule_uses_extrema() {
        let fib = levels(&[100.0, 200.0]).unwrap();
        let p = optimal_prices(&fib, OptimalPriceRule::PercentOffset, 5.0, 5.0);
        assert!((p.buy - 105.0).abs() < 1e-9);
        assert!((p.sell - 190.0).abs() < 1e-9);
    }
}
