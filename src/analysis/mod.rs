// =============================================================================
// Analysis Module
// =============================================================================
//
// Orchestration of the indicator calculators into a single report:
// - Signal aggregator (configuration-driven pipeline)
// - Analysis report (immutable output value)
// - Envelope (run metadata for batch callers)

pub mod aggregator;
pub mod envelope;
pub mod report;

pub use aggregator::SignalAggregator;
pub use envelope::AnalysisEnvelope;
pub use report::AnalysisReport;
