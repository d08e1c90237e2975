// =============================================================================
// Signal Aggregator
// =============================================================================
//
// Runs every calculator over one series and assembles an `AnalysisReport`.
// The aggregator holds only its immutable configuration, so one instance can
// serve any number of series concurrently.
//
// Pipeline:
//   1. Floor check      - the series must cover `config.min_bars()`
//   2. Price sequence   - daily closes or weekly averages
//   3. SMA short / long - crossover signal
//   4. RSI              - oversold / overbought signal
//   5. Retracement      - extrema, levels, optimal buy / sell
//   6. Patterns         - single-bar, two-bar, combined
//   7. Volume           - latest vs integer average
//   8. Trend            - conjunctive SMA / RSI / volume rule
//   9. Momentum         - N-bar delta and its sign
//  10. Today decision   - latest close against the configured thresholds
//
// Any failing step fails the whole call; no partial report is produced.

use tracing::{debug, info};

use crate::analysis::report::AnalysisReport;
use crate::error::AnalysisError;
use crate::indicators::fibonacci::{self, RetracementLevels, BUY_RATIO, SELL_RATIO};
use crate::indicators::{momentum, rsi, sma, volume};
use crate::market_data::TimeSeries;
use crate::patterns;
use crate::runtime_config::AnalysisConfig;
use crate::trend::{self, TrendInputs};
use crate::types::{
    MomentumSignal, PriceBasis, RsiSignal, SmaSignal, TodayDecision, TodayDecisionRule,
    VolumeSignal,
};

/// Stateless orchestrator over all indicator calculators.
#[derive(Debug, Clone)]
pub struct SignalAggregator {
    config: AnalysisConfig,
}

impl SignalAggregator {
    /// Build an aggregator after validating `config`.
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyse `series` and return the complete report.
    pub fn analyze(&self, series: &TimeSeries) -> Result<AnalysisReport, AnalysisError> {
        let cfg = &self.config;
        let symbol = series.symbol();

        // --- 1. Floor check ------------------------------------------------
        let min_bars = cfg.min_bars();
        if series.len() < min_bars {
            debug!(
                symbol,
                bars = series.len(),
                required = min_bars,
                "analysis rejected: insufficient history"
            );
            return Err(AnalysisError::insufficient(
                "signal aggregator",
                min_bars,
                series.len(),
            ));
        }

        // --- 2. Price sequence ---------------------------------------------
        let prices = match cfg.price_basis {
            PriceBasis::Daily => series.closes(),
            PriceBasis::Weekly => series.weekly_closes(),
        };

        // --- 3. Moving averages --------------------------------------------
        let short_sma = sma::sma(&prices, cfg.short_period);
        let long_sma = sma::sma(&prices, cfg.long_period);
        let sma_signal = SmaSignal::from_averages(short_sma, long_sma);

        // --- 4. RSI --------------------------------------------------------
        let rsi = rsi::rsi(&prices)?;
        let rsi_signal = RsiSignal::from_rsi(rsi, cfg.rsi_oversold, cfg.rsi_overbought);
        debug!(symbol, short_sma, long_sma, rsi, %sma_signal, %rsi_signal, "averages computed");

        // --- 5. Retracement ------------------------------------------------
        let fib = fibonacci::levels(&prices)?;
        let optimal = fibonacci::optimal_prices(
            &fib,
            cfg.optimal_price_rule,
            cfg.buy_offset_pct,
            cfg.sell_offset_pct,
        );

        // --- 6. Patterns ---------------------------------------------------
        let pattern_report = patterns::detect(series.bars())?;
        debug!(
            symbol,
            single_bar = %pattern_report.single_bar,
            two_bar = %pattern_report.two_bar,
            "candlestick patterns classified"
        );

        // --- 7. Volume -----------------------------------------------------
        let latest = series.latest();
        let average_volume = volume::average_volume(&series.volumes())?;
        let volume_signal = VolumeSignal::from_volumes(latest.volume, average_volume);

        // --- 8. Trend ------------------------------------------------------
        let trend = trend::classify(&TrendInputs {
            short_sma,
            long_sma,
            rsi,
            latest_volume: latest.volume,
            average_volume,
        });

        // --- 9. Momentum ---------------------------------------------------
        let momentum = momentum::momentum(&prices, cfg.momentum_window)?;
        let momentum_signal = MomentumSignal::from_momentum(momentum);

        // --- 10. Today decision --------------------------------------------
        let today_decision = self.today_decision(latest.close, &fib);

        info!(
            symbol,
            bars = series.len(),
            %trend,
            %today_decision,
            pattern = %pattern_report.combined,
            "analysis complete"
        );

        Ok(AnalysisReport {
            symbol: symbol.to_string(),
            price_basis: cfg.price_basis,
            bars_analyzed: series.len(),
            short_sma,
            long_sma,
            sma_signal,
            rsi,
            rsi_signal,
            max_price: fib.max,
            min_price: fib.min,
            fibonacci_levels: fib.levels,
            optimal_price_rule: cfg.optimal_price_rule,
            optimal_buy_price: optimal.buy,
            optimal_sell_price: optimal.sell,
            candlestick_pattern: pattern_report.combined,
            candlestick_advice: pattern_report.combined.advice().to_string(),
            single_bar_pattern: pattern_report.single_bar,
            two_bar_pattern: pattern_report.two_bar,
            trend,
            momentum,
            momentum_signal,
            latest_volume: latest.volume,
            average_volume,
            volume_signal,
            today_decision,
            latest_close: latest.close,
            latest_date: latest.date,
        })
    }

    /// Compare the latest close against the buy / avoid thresholds.
    fn today_decision(&self, latest_close: f64, fib: &RetracementLevels) -> TodayDecision {
        let (buy_below, avoid_above) = match self.config.today_decision_rule {
            TodayDecisionRule::PercentOffset => (
                fib.min * (1.0 + self.config.buy_offset_pct / 100.0),
                fib.max * (1.0 - self.config.sell_offset_pct / 100.0),
            ),
            // The 38.2% level never sits below the 61.8% level, so this rule
            // only ever yields Buy or Avoid.
            TodayDecisionRule::Retracement => {
                let diff = fib.max - fib.min;
                (fib.max - diff * BUY_RATIO, fib.max - diff * SELL_RATIO)
            }
        };

        if latest_close < buy_below {
            TodayDecision::Buy
        } else if latest_close > avoid_above {
            TodayDecision::Avoid
        } else {
            TodayDecision::Neutral
        }
    }
}

impl Default for SignalAggregator {
    fn default() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }
}
