// =============================================================================
// Signal Engine - Batch Runner
// =============================================================================
//
// Usage:  signal-engine <series.json> [<series.json> ...]
//
// Environment:
//   ANALYSIS_CONFIG   path to the JSON config (default: analysis_config.json)
//   ANALYSIS_OUTPUT   "json" (default) or "text"
//   RUST_LOG          tracing filter (default: info)
//
// Each series is analysed on its own blocking task.  A failing instrument is
// logged and skipped; the process exits non-zero if any instrument failed.
// =============================================================================

use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use signal_engine::market_data::load_series;
use signal_engine::{AnalysisConfig, AnalysisEnvelope, SignalAggregator};

const DEFAULT_CONFIG_PATH: &str = "analysis_config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    fn from_env() -> Self {
        match std::env::var("ANALYSIS_OUTPUT") {
            Ok(v) if v.eq_ignore_ascii_case("text") => Self::Text,
            _ => Self::Json,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path =
        std::env::var("ANALYSIS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = AnalysisConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, path = %config_path, "Failed to load config, using defaults");
        AnalysisConfig::default()
    });

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        bail!("usage: signal-engine <series.json> [<series.json> ...]");
    }

    let format = OutputFormat::from_env();
    let aggregator = Arc::new(SignalAggregator::new(config).context("invalid analysis config")?);

    info!(
        instruments = paths.len(),
        min_bars = aggregator.config().min_bars(),
        ?format,
        "Starting analysis batch"
    );

    // ── 2. Fan out: one blocking task per instrument ─────────────────────
    let handles: Vec<_> = paths
        .into_iter()
        .map(|path| {
            let aggregator = Arc::clone(&aggregator);
            tokio::task::spawn_blocking(move || -> anyhow::Result<AnalysisEnvelope> {
                let series = load_series(&path)?;
                let report = aggregator
                    .analyze(&series)
                    .with_context(|| format!("analysis of {} failed", series.symbol()))?;
                Ok(AnalysisEnvelope::new(path, report))
            })
        })
        .collect();

    // ── 3. Collect in input order ────────────────────────────────────────
    let mut failures = 0usize;
    for handle in handles {
        let outcome = handle.await.context("analysis task panicked")?;
        match outcome {
            Ok(envelope) => print_envelope(&envelope, format)?,
            Err(e) => {
                failures += 1;
                error!(error = %format!("{e:#}"), "Instrument analysis failed");
            }
        }
    }

    if failures > 0 {
        bail!("{failures} instrument(s) failed analysis");
    }

    info!("Analysis batch complete");
    Ok(())
}

fn print_envelope(envelope: &AnalysisEnvelope, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(envelope)
                .context("failed to serialise analysis envelope")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            println!("[{}] {}", envelope.id, envelope.source);
            for line in envelope.report.summary_lines() {
                println!("{line}");
            }
            println!();
        }
    }
    Ok(())
}
