// =============================================================================
// Analysis Report - the engine's sole output
// =============================================================================
//
// An immutable snapshot of every signal computed for one series.  Field names
// serialise in camelCase; turning the report into any transport format is
// left to the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::indicators::fibonacci::RetracementLevel;
use crate::patterns::CandlePattern;
use crate::types::{
    MomentumSignal, OptimalPriceRule, PriceBasis, RsiSignal, SmaSignal, TodayDecision, Trend,
    VolumeSignal,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub symbol: String,
    pub price_basis: PriceBasis,
    pub bars_analyzed: usize,

    // --- Moving averages ---
    #[serde(rename = "shortSMA")]
    pub short_sma: f64,
    #[serde(rename = "longSMA")]
    pub long_sma: f64,
    pub sma_signal: SmaSignal,

    // --- RSI ---
    pub rsi: f64,
    pub rsi_signal: RsiSignal,

    // --- Retracement ---
    pub fibonacci_levels: Vec<RetracementLevel>,
    pub max_price: f64,
    pub min_price: f64,
    pub optimal_price_rule: OptimalPriceRule,
    pub optimal_buy_price: f64,
    pub optimal_sell_price: f64,

    // --- Candlesticks ---
    pub candlestick_pattern: CandlePattern,
    pub candlestick_advice: String,
    pub single_bar_pattern: CandlePattern,
    pub two_bar_pattern: CandlePattern,

    // --- Trend, momentum, volume ---
    pub trend: Trend,
    pub momentum: f64,
    pub momentum_signal: MomentumSignal,
    pub latest_volume: u64,
    pub average_volume: u64,
    pub volume_signal: VolumeSignal,

    // --- Latest bar ---
    pub today_decision: TodayDecision,
    pub latest_close: f64,
    pub latest_date: NaiveDate,
}

impl AnalysisReport {
    /// Human-readable rendering, one line per signal.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "{} ({} basis, {} bars) - latest close {:.4} on {}",
                self.symbol, self.price_basis, self.bars_analyzed, self.latest_close, self.latest_date
            ),
            format!(
                "SMA short={:.4} long={:.4}: {}",
                self.short_sma,
                self.long_sma,
                self.sma_signal.describe()
            ),
            format!("RSI {:.2}: {}", self.rsi, self.rsi_signal.describe()),
            format!(
                "Range max={:.4} min={:.4}",
                self.max_price, self.min_price
            ),
        ];

        lines.extend(
            self.fibonacci_levels
                .iter()
                .map(|l| format!("  Fibonacci {:>6}: {:.4}", l.label, l.price)),
        );

        lines.push(format!(
            "Optimal buy {:.4} / sell {:.4} ({})",
            self.optimal_buy_price, self.optimal_sell_price, self.optimal_price_rule
        ));
        lines.push(format!(
            "Candlestick: {} ({})",
            self.candlestick_pattern, self.candlestick_advice
        ));
        lines.push(format!(
            "Volume {} vs average {}: {}",
            self.latest_volume,
            self.average_volume,
            self.volume_signal.describe()
        ));
        lines.push(format!("Trend: {}", self.trend.describe()));
        lines.push(format!(
            "Momentum {:+.4}: {}",
            self.momentum,
            self.momentum_signal.describe()
        ));
        lines.push(format!("Today: {}", self.today_decision.describe()));

        lines
    }
}
