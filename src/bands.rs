//! Band edge derivation
//!
//! The filterbank covers [20 Hz, Nyquist - 50 Hz] with linearly spaced
//! edges. Both the analysis pass (modulator) and the synthesis pass
//! (carrier) must use the same edge set, so edges are computed once and
//! passed by reference to both stages.

use crate::error::VocoderError;

/// Lowest band edge in Hz, kept away from DC
pub const MIN_EDGE_HZ: f64 = 20.0;

/// Margin below Nyquist for the highest edge in Hz
pub const NYQUIST_MARGIN_HZ: f64 = 50.0;

/// Compute `num_bands + 1` linearly spaced band edges in Hz
///
/// Edges span [20, sample_rate/2 - 50] inclusive, defining `num_bands`
/// contiguous, non-overlapping passbands. The clamps away from 0 Hz and
/// Nyquist keep the band-pass design stable.
///
/// # Errors
///
/// Returns `FilterDesign` if `num_bands` is zero or the sample rate is too
/// low for the span to be non-empty (sample_rate <= 140 Hz).
pub fn compute_band_edges(
    sample_rate: u32,
    num_bands: usize,
) -> Result<Vec<f64>, VocoderError> {
    if num_bands == 0 {
        return Err(VocoderError::FilterDesign(
            "num_bands must be at least 1".to_string(),
        ));
    }

    let high = (sample_rate / 2) as f64 - NYQUIST_MARGIN_HZ;
    if high <= MIN_EDGE_HZ {
        return Err(VocoderError::FilterDesign(format!(
            "sample rate {} Hz too low: highest band edge {:.1} Hz would not exceed {:.1} Hz",
            sample_rate, high, MIN_EDGE_HZ
        )));
    }

    let step = (high - MIN_EDGE_HZ) / num_bands as f64;
    let edges: Vec<f64> = (0..=num_bands)
        .map(|i| MIN_EDGE_HZ + step * i as f64)
        .collect();

    log::debug!(
        "Computed {} band edges over [{:.1}, {:.1}] Hz at {} Hz",
        edges.len(),
        MIN_EDGE_HZ,
        high,
        sample_rate
    );

    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_cover_span() {
        let edges = compute_band_edges(44100, 20).unwrap();
        assert_eq!(edges.len(), 21);
        assert!((edges[0] - 20.0).abs() < 1e-9);
        assert!((edges[20] - (22050.0 - 50.0)).abs() < 1e-9);
    }

    #[test]
    fn test_edges_monotonic_no_gaps() {
        for &(sr, n) in &[(44100u32, 20usize), (48000, 7), (22050, 1), (200, 3)] {
            let edges = compute_band_edges(sr, n).unwrap();
            assert_eq!(edges.len(), n + 1);
            for w in edges.windows(2) {
                assert!(
                    w[1] > w[0],
                    "edges must be strictly increasing for sr={}, n={}",
                    sr,
                    n
                );
            }
            // Contiguous bands: each band starts where the previous ends,
            // so the union of intervals is exactly [first, last].
            assert!(edges[0] > 0.0);
            assert!(edges[n] < sr as f64 / 2.0);
        }
    }

    #[test]
    fn test_single_band_spans_everything() {
        let edges = compute_band_edges(44100, 1).unwrap();
        assert_eq!(edges, vec![20.0, 22000.0]);
    }

    #[test]
    fn test_zero_bands_rejected() {
        assert!(matches!(
            compute_band_edges(44100, 0),
            Err(VocoderError::FilterDesign(_))
        ));
    }

    #[test]
    fn test_sample_rate_too_low() {
        assert!(matches!(
            compute_band_edges(100, 4),
            Err(VocoderError::FilterDesign(_))
        ));
    }
}
