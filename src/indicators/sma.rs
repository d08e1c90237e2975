// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Arithmetic mean of the last `period` closes:
//   SMA = (close_{n-period} + ... + close_{n-1}) / period
//
// The calculator is total: a series shorter than `period` yields 0.0.  Callers
// that must tell "no history" apart from a real average check the length
// first (the aggregator enforces its floor before calling in).

/// Mean of the trailing `period` closes, or `0.0` when fewer are available.
pub fn sma(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period {
        return 0.0;
    }

    let window = &closes[closes.len() - period..];
    window.iter().sum::<f64>() / period as f64
}
