// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free calculators used by the signal aggregator.  Each
// one that can refuse its input returns `Result<_, AnalysisError>` so that
// missing history surfaces as `InsufficientData` instead of a silent zero.
// The SMA is the exception: it stays total and returns 0.0 for short input.

pub mod fibonacci;
pub mod momentum;
pub mod rsi;
pub mod sma;
pub mod volume;
