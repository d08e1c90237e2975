// =============================================================================
// Momentum - N-bar price change
// =============================================================================
//
// Momentum is the raw price delta over a look-back window:
//   momentum = close[last] - close[last - window]
//
// A window of 5 therefore needs 6 closes.  Short input is an error rather
// than 0.0, since a real zero change must stay distinguishable from missing
// history.

use crate::error::AnalysisError;

/// Default look-back window.
pub const DEFAULT_WINDOW: usize = 5;

/// Price change between the latest close and the close `window` bars earlier.
pub fn momentum(closes: &[f64], window: usize) -> Result<f64, AnalysisError> {
    let required = window.saturating_add(1);
    if window == 0 || closes.len() < required {
        return Err(AnalysisError::insufficient("momentum", required, closes.len()));
    }

    let last = closes.len() - 1;
    Ok(closes[last] - closes[last - window])
}
