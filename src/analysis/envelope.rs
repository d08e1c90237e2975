// =============================================================================
// Analysis Envelope - traceable record of one analysis run
// =============================================================================
//
// Wraps a report with the metadata a batch caller needs to correlate output
// with its input: a unique id, the source it was read from, and the time the
// analysis was produced.

use serde::Serialize;

use crate::analysis::report::AnalysisReport;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisEnvelope {
    /// Unique identifier for this run (UUID v4).
    pub id: String,

    pub symbol: String,

    /// Where the series came from (file path, provider name, ...).
    pub source: String,

    /// ISO 8601 timestamp of when the envelope was created.
    pub created_at: String,

    pub report: AnalysisReport,
}

impl AnalysisEnvelope {
    pub fn new(source: impl Into<String>, report: AnalysisReport) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            symbol: report.symbol.clone(),
            source: source.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
            report,
        }
    }
}
