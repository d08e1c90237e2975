// =============================================================================
// Relative Strength Index (RSI) - whole-series averaging
// =============================================================================
//
// RSI compares the magnitude of up moves against down moves.  Gains and
// losses are accumulated over every consecutive delta of the supplied series
// (no fixed 14-bar window, no Wilder smoothing) and both sums are divided by
// the number of closes, not the number of deltas:
//
//   avg_gain = sum(max(delta, 0))  / N
//   avg_loss = sum(max(-delta, 0)) / N
//   RS       = avg_gain / avg_loss
//   RSI      = 100 - 100 / (1 + RS)
//
// Zero-loss policy:
//   avg_loss == 0 && avg_gain > 0  => 100.0
//   avg_loss == 0 && avg_gain == 0 => 50.0 (flat series)
// =============================================================================

use crate::error::AnalysisError;

/// Minimum number of closes for one price delta.
pub const MIN_CLOSES: usize = 2;

/// Average gain and average loss over the whole series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsiAverages {
    pub avg_gain: f64,
    pub avg_loss: f64,
}

/// Compute the average gain / loss pair for `closes`.
pub fn averages(closes: &[f64]) -> Result<RsiAverages, AnalysisError> {
    if closes.len() < MIN_CLOSES {
        return Err(AnalysisError::insufficient("rsi", MIN_CLOSES, closes.len()));
    }

    let (gain, loss) = closes.windows(2).fold((0.0_f64, 0.0_f64), |(g, l), w| {
        let delta = w[1] - w[0];
        if delta > 0.0 {
            (g + delta, l)
        } else {
            (g, l - delta)
        }
    });

    let n = closes.len() as f64;
    Ok(RsiAverages {
        avg_gain: gain / n,
        avg_loss: loss / n,
    })
}

/// RSI of the whole series, always within [0, 100].
pub fn rsi(closes: &[f64]) -> Result<f64, AnalysisError> {
    let RsiAverages { avg_gain, avg_loss } = averages(closes)?;
    Ok(rsi_from_averages(avg_gain, avg_loss))
}

/// Convert average gain / average loss into an RSI value.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_single_close_is_insufficient() {
        let err = rsi(&[10.0]).unwrap_err();
        assert_eq!(err, AnalysisError::insufficient("rsi", 2, 1));
    }

    #[test]
    fn rsi_empty_is_insufficient() {
        assert!(rsi(&[]).is_err());
    }

    #[test]
    fn rsi_all_gains() {
        let closes: Vec<f64> = (1..=12).map(|x| x as f64).collect();
        assert!((rsi(&closes).unwrap() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn rsi_all_losses() {
        let closes: Vec<f64> = (1..=12).rev().map(|x| x as f64).collect();
        let avgs = averages(&closes).unwrap();
        assert_eq!(avgs.avg_gain, 0.0);
        assert!(rsi(&closes).unwrap().abs() < 1e-10);
    }

    #[test]
    fn rsi_flat_market() {
        let closes = vec![10.0; 10];
        assert!((rsi(&closes).unwrap() - 50.0).abs() < 1e-10);
    }

    #[test]
    fn averages_divide_by_close_count() {
        // Deltas: +2, -1, +3 => gain 5, loss 1, N = 4.
        let avgs = averages(&[10.0, 12.0, 11.0, 14.0]).unwrap();
        assert!((avgs.avg_gain - 1.25).abs() < 1e-10);
        assert!((avgs.avg_loss - 0.25).abs() < 1e-10);
        // RS = 5 => RSI = 100 - 100/6
        let expected = 100.0 - 100.0 / 6.0;
        assert!((rsi(&[10.0, 12.0, 11.0, 14.0]).unwrap() - expected).abs() < 1e-10);
    }

    #[test]
    fn rsi_range_check() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let v = rsi(&closes).unwrap();
        assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
    }
}
