// =============================================================================
// Volume statistics
// =============================================================================

use crate::error::AnalysisError;

/// Integer mean of all volumes (floor division).
pub fn average_volume(volumes: &[u64]) -> Result<u64, AnalysisError> {
    if volumes.is_empty() {
        return Err(AnalysisError::insufficient("average volume", 1, 0));
    }

    // Sum in u128 so long histories of large volumes cannot overflow.
    let total: u128 = volumes.iter().map(|&v| u128::from(v)).sum();
    let mean = total / volumes.len() as u128;
    Ok(u64::try_from(mean).unwrap_or(u64::MAX))
}
