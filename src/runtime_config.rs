// =============================================================================
// Analysis Configuration - named engine parameters with atomic save
// =============================================================================
//
// Every tunable parameter of the signal aggregator lives here.  All fields
// carry `#[serde(default)]` so that a partial JSON file (or an older one
// missing newer fields) still loads, with the missing values at their
// defaults.  Keys are written in snake_case; camelCase keys are accepted
// on load.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AnalysisError;
use crate::market_data::series::BARS_PER_WEEK;
use crate::types::{OptimalPriceRule, PriceBasis, TodayDecisionRule};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_short_period() -> usize {
    5
}

fn default_long_period() -> usize {
    10
}

fn default_momentum_window() -> usize {
    5
}

fn default_offset_pct() -> f64 {
    5.0
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_rsi_overbought() -> f64 {
    70.0
}

// =============================================================================
// AnalysisConfig
// =============================================================================

/// Parameters recognised by the signal aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    // --- Windows ------------------------------------------------------------

    /// Short SMA window.
    #[serde(default = "default_short_period", alias = "shortPeriod")]
    pub short_period: usize,

    /// Long SMA window.  Also the minimum history the aggregator accepts.
    #[serde(default = "default_long_period", alias = "longPeriod")]
    pub long_period: usize,

    /// Momentum look-back in bars (needs `momentum_window + 1` closes).
    #[serde(default = "default_momentum_window", alias = "momentumWindow")]
    pub momentum_window: usize,

    // --- Price selection rules ---------------------------------------------

    /// How optimal buy / sell prices are derived.
    #[serde(default, alias = "optimalPriceRule")]
    pub optimal_price_rule: OptimalPriceRule,

    /// Which thresholds drive the today decision.
    #[serde(default, alias = "todayDecisionRule")]
    pub today_decision_rule: TodayDecisionRule,

    /// Percentage above the series minimum that still counts as a buy
    /// (5.0 means `min * 1.05`).
    #[serde(default = "default_offset_pct", alias = "buyOffsetPct")]
    pub buy_offset_pct: f64,

    /// Percentage below the series maximum where buying is avoided
    /// (5.0 means `max * 0.95`).
    #[serde(default = "default_offset_pct", alias = "sellOffsetPct")]
    pub sell_offset_pct: f64,

    // --- RSI thresholds -----------------------------------------------------

    #[serde(default = "default_rsi_oversold", alias = "rsiOversold")]
    pub rsi_oversold: f64,

    #[serde(default = "default_rsi_overbought", alias = "rsiOverbought")]
    pub rsi_overbought: f64,

    // --- Input -------------------------------------------------------------

    /// Daily closes, or weekly averages of them.
    #[serde(default, alias = "priceBasis")]
    pub price_basis: PriceBasis,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            short_period: default_short_period(),
            long_period: default_long_period(),
            momentum_window: default_momentum_window(),
            optimal_price_rule: OptimalPriceRule::default(),
            today_decision_rule: TodayDecisionRule::default(),
            buy_offset_pct: default_offset_pct(),
            sell_offset_pct: default_offset_pct(),
            rsi_oversold: default_rsi_oversold(),
            rsi_overbought: default_rsi_overbought(),
            price_basis: PriceBasis::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read analysis config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse analysis config from {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("analysis config at {} is invalid", path.display()))?;

        info!(
            path = %path.display(),
            short_period = config.short_period,
            long_period = config.long_period,
            optimal_price_rule = %config.optimal_price_rule,
            price_basis = %config.price_basis,
            "analysis config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise analysis config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "analysis config saved (atomic)");
        Ok(())
    }

    /// Reject parameter combinations the aggregator cannot honour.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.short_period == 0 || self.long_period == 0 || self.momentum_window == 0 {
            return Err(AnalysisError::InvalidConfig(
                "periods and momentum window must be positive".into(),
            ));
        }
        if self.short_period >= self.long_period {
            return Err(AnalysisError::InvalidConfig(format!(
                "short_period ({}) must be below long_period ({})",
                self.short_period, self.long_period
            )));
        }
        if !(0.0 <= self.rsi_oversold
            && self.rsi_oversold < self.rsi_overbought
            && self.rsi_overbought <= 100.0)
        {
            return Err(AnalysisError::InvalidConfig(format!(
                "RSI thresholds must satisfy 0 <= oversold ({}) < overbought ({}) <= 100",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        for (name, pct) in [
            ("buy_offset_pct", self.buy_offset_pct),
            ("sell_offset_pct", self.sell_offset_pct),
        ] {
            if !(0.0..100.0).contains(&pct) {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{name} must be within [0, 100), got {pct}"
                )));
            }
        }
        let floor = self
            .momentum_window
            .checked_add(1)
            .map(|momentum_floor| self.long_period.max(momentum_floor));
        let basis_factor = match self.price_basis {
            PriceBasis::Daily => 1,
            PriceBasis::Weekly => BARS_PER_WEEK,
        };
        if floor.and_then(|f| f.checked_mul(basis_factor)).is_none() {
            return Err(AnalysisError::InvalidConfig(format!(
                "long_period ({}) and momentum_window ({}) exceed the representable history",
                self.long_period, self.momentum_window
            )));
        }
        Ok(())
    }

    /// Minimum number of price points the indicators need.
    ///
    /// Saturates for windows `validate` would reject.
    pub fn min_prices(&self) -> usize {
        self.long_period
            .max(self.momentum_window.saturating_add(1))
            .max(2)
    }

    /// Minimum number of bars a series must hold to be analysed.
    pub fn min_bars(&self) -> usize {
        match self.price_basis {
            PriceBasis::Daily => self.min_prices(),
            PriceBasis::Weekly => self.min_prices().saturating_mul(BARS_PER_WEEK),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.short_period, 5);
        assert_eq!(cfg.long_period, 10);
        assert_eq!(cfg.momentum_window, 5);
        assert_eq!(cfg.optimal_price_rule, OptimalPriceRule::Retracement);
        assert_eq!(cfg.today_decision_rule, TodayDecisionRule::PercentOffset);
        assert_eq!(cfg.price_basis, PriceBasis::Daily);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn default_floor_is_long_period() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.min_bars(), 10);
    }

    #[test]
    fn floor_follows_momentum_window() {
        let cfg = AnalysisConfig {
            momentum_window: 14,
            ..AnalysisConfig::default()
        };
        assert_eq!(cfg.min_bars(), 15);
    }

    #[test]
    fn weekly_floor_scales_by_week() {
        let cfg = AnalysisConfig {
            price_basis: PriceBasis::Weekly,
            ..AnalysisConfig::default()
        };
        assert_eq!(cfg.min_bars(), 50);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: AnalysisConfig =
            serde_json::from_str(r#"{ "optimal_price_rule": "percent-offset" }"#).unwrap();
        assert_eq!(cfg.optimal_price_rule, OptimalPriceRule::PercentOffset);
        assert_eq!(cfg.long_period, 10);
        assert!((cfg.buy_offset_pct - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn camel_case_keys_are_accepted() {
        let cfg: AnalysisConfig = serde_json::from_str(
            r#"{ "optimalPriceRule": "percent-offset", "momentumWindow": 7, "priceBasis": "weekly" }"#,
        )
        .unwrap();
        assert_eq!(cfg.optimal_price_rule, OptimalPriceRule::PercentOffset);
        assert_eq!(cfg.momentum_window, 7);
        assert_eq!(cfg.price_basis, PriceBasis::Weekly);
    }

    #[test]
    fn rejects_inverted_periods() {
        let cfg = AnalysisConfig {
            short_period: 10,
            long_period: 5,
            ..AnalysisConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(AnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_window() {
        let cfg = AnalysisConfig {
            momentum_window: 0,
            ..AnalysisConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_crossed_rsi_thresholds() {
        let cfg = AnalysisConfig {
            rsi_oversold: 80.0,
            ..AnalysisConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_full_offset() {
        let cfg = AnalysisConfig {
            sell_offset_pct: 100.0,
            ..AnalysisConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_unrepresentable_momentum_window() {
        let cfg = AnalysisConfig {
            momentum_window: usize::MAX,
            ..AnalysisConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(AnalysisError::InvalidConfig(_))));
        assert_eq!(cfg.min_bars(), usize::MAX);
    }

    #[test]
    fn rejects_weekly_floor_overflow() {
        let cfg = AnalysisConfig {
            long_period: usize::MAX / 2,
            price_basis: PriceBasis::Weekly,
            ..AnalysisConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(AnalysisError::InvalidConfig(_))));

        let daily = AnalysisConfig {
            price_basis: PriceBasis::Daily,
            ..cfg
        };
        assert!(daily.validate().is_ok());
    }

    #[test]
    fn load_rejects_huge_window() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "momentum_window": 18446744073709551615 }"#)
            .unwrap();
        assert!(AnalysisConfig::load(file.path()).is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis_config.json");
        let cfg = AnalysisConfig {
            price_basis: PriceBasis::Weekly,
            today_decision_rule: TodayDecisionRule::Retracement,
            ..AnalysisConfig::default()
        };
        cfg.save(&path).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(AnalysisConfig::load(&path).unwrap(), cfg);
    }

    #[test]
    fn load_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "short_period": 20 }"#).unwrap();
        let err = AnalysisConfig::load(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::InvalidConfig(_))
        ));
    }
}
