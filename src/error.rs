// =============================================================================
// Engine errors
// =============================================================================
//
// Every calculator that can refuse its input returns `AnalysisError`.  The
// aggregator propagates the first error it meets, so callers either receive a
// complete report or exactly one of these kinds.
//
// Degenerate inputs (flat series, zero-width price range) are not errors:
// they resolve to fixed values inside the calculators.

use thiserror::Error;

/// The unified error type for the analysis engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The series is shorter than the minimum window of `component`.
    #[error("insufficient data for {component}: need {required} bars, have {available}")]
    InsufficientData {
        component: &'static str,
        required: usize,
        available: usize,
    },

    /// The bars violate ordering or OHLCV consistency rules.
    #[error("invalid series: {0}")]
    InvalidSeries(String),

    /// The analysis parameters are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AnalysisError {
    /// Shorthand for building an `InsufficientData` error.
    pub fn insufficient(component: &'static str, required: usize, available: usize) -> Self {
        Self::InsufficientData {
            component,
            required,
            available,
        }
    }
}
