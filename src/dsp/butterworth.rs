//! Butterworth band-pass filter design
//!
//! Implements the classic zpk design pipeline for a digital Butterworth
//! band-pass filter: analog low-pass prototype, low-pass to band-pass
//! transform, bilinear transform, then expansion to transfer-function
//! coefficients. A 4th-order prototype yields an 8th-order digital filter
//! (9 numerator and 9 denominator taps).
//!
//! Design runs entirely in `f64`; an 8th-order transfer function is not
//! reliably representable in `f32`.

use crate::error::VocoderError;
use rustfft::num_complex::Complex64;

/// Band-pass prototype order (digital order is twice this)
pub const FILTER_ORDER: usize = 4;

/// Minimum stable passband width as a fraction of Nyquist
///
/// Below this width the digital poles crowd the unit circle and the
/// transfer-function expansion loses the stability margin, so the design
/// is rejected up front instead of producing a silently wrong filter.
pub const MIN_NORMALIZED_BANDWIDTH: f64 = 1e-4;

/// Digital band-pass filter coefficients
///
/// `b` is the numerator and `a` the denominator, both of length
/// `2 * FILTER_ORDER + 1` with `a[0] == 1`.
#[derive(Debug, Clone)]
pub struct BandpassFilter {
    /// Numerator taps
    pub b: Vec<f64>,
    /// Denominator taps, normalized so `a[0] == 1`
    pub a: Vec<f64>,
}

/// Design a 4th-order Butterworth band-pass filter
///
/// # Arguments
///
/// * `low_hz` - Lower passband edge in Hz
/// * `high_hz` - Upper passband edge in Hz
/// * `sample_rate` - Sample rate in Hz
///
/// # Errors
///
/// Returns `FilterDesign` if the edges are not strictly inside
/// (0, Nyquist), the normalized bandwidth is below
/// `MIN_NORMALIZED_BANDWIDTH`, or any digital pole lands on or outside
/// the unit circle.
pub fn design_bandpass(
    low_hz: f64,
    high_hz: f64,
    sample_rate: u32,
) -> Result<BandpassFilter, VocoderError> {
    if sample_rate == 0 {
        return Err(VocoderError::FilterDesign(
            "sample rate must be positive".to_string(),
        ));
    }

    let nyquist = sample_rate as f64 / 2.0;
    let low = low_hz / nyquist;
    let high = high_hz / nyquist;

    if !(low > 0.0 && high < 1.0 && low < high) {
        return Err(VocoderError::FilterDesign(format!(
            "band edges [{:.2}, {:.2}] Hz must lie strictly inside (0, {:.1}) Hz",
            low_hz, high_hz, nyquist
        )));
    }

    if high - low < MIN_NORMALIZED_BANDWIDTH {
        return Err(VocoderError::FilterDesign(format!(
            "band [{:.2}, {:.2}] Hz is narrower than the minimum stable \
             bandwidth ({:.3} Hz at {} Hz); reduce num_bands",
            low_hz,
            high_hz,
            MIN_NORMALIZED_BANDWIDTH * nyquist,
            sample_rate
        )));
    }

    // Bilinear pre-warp of the edge frequencies (internal rate of 2 Hz,
    // so Nyquist maps to 1.0).
    let fs = 2.0;
    let warped_low = 2.0 * fs * (std::f64::consts::PI * low / fs).tan();
    let warped_high = 2.0 * fs * (std::f64::consts::PI * high / fs).tan();
    let bw = warped_high - warped_low;
    let wo = (warped_low * warped_high).sqrt();

    // Analog Butterworth low-pass prototype: poles evenly spaced on the
    // left half of the unit circle, no zeros, unit gain.
    let mut prototype = Vec::with_capacity(FILTER_ORDER);
    for k in 0..FILTER_ORDER {
        let m = (2 * k) as f64 - (FILTER_ORDER as f64 - 1.0);
        let theta = std::f64::consts::PI * m / (2.0 * FILTER_ORDER as f64);
        prototype.push(-Complex64::new(0.0, theta).exp());
    }

    // Low-pass to band-pass: each prototype pole splits into a pair; the
    // zeros are FILTER_ORDER copies of the origin.
    let mut analog_poles = Vec::with_capacity(2 * FILTER_ORDER);
    for &p in &prototype {
        let scaled = p * (bw / 2.0);
        let offset = (scaled * scaled - Complex64::new(wo * wo, 0.0)).sqrt();
        analog_poles.push(scaled + offset);
        analog_poles.push(scaled - offset);
    }
    let analog_zeros = vec![Complex64::new(0.0, 0.0); FILTER_ORDER];
    let gain = bw.powi(FILTER_ORDER as i32);

    // Bilinear transform to the digital plane.
    let fs2 = 2.0 * fs;
    let digital_poles: Vec<Complex64> = analog_poles
        .iter()
        .map(|&p| (Complex64::new(fs2, 0.0) + p) / (Complex64::new(fs2, 0.0) - p))
        .collect();
    let mut digital_zeros: Vec<Complex64> = analog_zeros
        .iter()
        .map(|&z| (Complex64::new(fs2, 0.0) + z) / (Complex64::new(fs2, 0.0) - z))
        .collect();
    // Zeros at infinity map to Nyquist (z = -1).
    digital_zeros.resize(digital_poles.len(), Complex64::new(-1.0, 0.0));

    let num: Complex64 = analog_zeros
        .iter()
        .map(|&z| Complex64::new(fs2, 0.0) - z)
        .product();
    let den: Complex64 = analog_poles
        .iter()
        .map(|&p| Complex64::new(fs2, 0.0) - p)
        .product();
    let digital_gain = gain * (num / den).re;

    for p in &digital_poles {
        if p.norm() >= 1.0 {
            return Err(VocoderError::FilterDesign(format!(
                "band [{:.2}, {:.2}] Hz yields an unstable filter (pole radius {:.6})",
                low_hz,
                high_hz,
                p.norm()
            )));
        }
    }

    let b: Vec<f64> = poly(&digital_zeros)
        .iter()
        .map(|&c| (c * digital_gain).re)
        .collect();
    let a: Vec<f64> = poly(&digital_poles).iter().map(|c| c.re).collect();

    Ok(BandpassFilter { b, a })
}

/// Expand a set of roots into monic polynomial coefficients
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &r in roots {
        coeffs.push(Complex64::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= r * prev;
        }
    }
    coeffs
}

/// Magnitude of the frequency response at a normalized frequency
///
/// `normalized_freq` is in units of Nyquist (0.0 = DC, 1.0 = Nyquist).
pub fn magnitude_response(filter: &BandpassFilter, normalized_freq: f64) -> f64 {
    let w = std::f64::consts::PI * normalized_freq;
    let z_inv = Complex64::new(0.0, -w).exp();
    let mut num = Complex64::new(0.0, 0.0);
    let mut den = Complex64::new(0.0, 0.0);
    let mut z_pow = Complex64::new(1.0, 0.0);
    for i in 0..filter.b.len().max(filter.a.len()) {
        if i < filter.b.len() {
            num += filter.b[i] * z_pow;
        }
        if i < filter.a.len() {
            den += filter.a[i] * z_pow;
        }
        z_pow *= z_inv;
    }
    (num / den).norm()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficient_shape() {
        let filter = design_bandpass(400.0, 1500.0, 44100).unwrap();
        assert_eq!(filter.b.len(), 2 * FILTER_ORDER + 1);
        assert_eq!(filter.a.len(), 2 * FILTER_ORDER + 1);
        assert!((filter.a[0] - 1.0).abs() < 1e-12);
        for (&b, &a) in filter.b.iter().zip(filter.a.iter()) {
            assert!(b.is_finite() && a.is_finite());
        }
    }

    #[test]
    fn test_frequency_response() {
        // Edges at 0.2 and 0.4 of Nyquist.
        let filter = design_bandpass(4410.0, 8820.0, 44100).unwrap();

        // Butterworth is maximally flat: near-unity gain at the geometric
        // center of the passband, -3 dB at the edges, zeros at DC and
        // Nyquist.
        let center = (0.2f64 * 0.4).sqrt();
        assert!(magnitude_response(&filter, center) > 0.95);
        assert!((magnitude_response(&filter, 0.2) - std::f64::consts::FRAC_1_SQRT_2).abs() < 0.05);
        assert!(magnitude_response(&filter, 0.02) < 1e-3);
        assert!(magnitude_response(&filter, 0.9) < 1e-3);
    }

    #[test]
    fn test_poles_stable_across_bands() {
        // The full default filterbank must design cleanly.
        let edges = crate::bands::compute_band_edges(44100, 20).unwrap();
        for pair in edges.windows(2) {
            let filter = design_bandpass(pair[0], pair[1], 44100).unwrap();
            assert!(filter.a.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn test_too_narrow_band_rejected() {
        let err = design_bandpass(1000.0, 1000.5, 44100).unwrap_err();
        assert!(matches!(err, VocoderError::FilterDesign(_)));
    }

    #[test]
    fn test_invalid_edges_rejected() {
        assert!(design_bandpass(0.0, 1000.0, 44100).is_err());
        assert!(design_bandpass(1000.0, 22050.0, 44100).is_err());
        assert!(design_bandpass(2000.0, 1000.0, 44100).is_err());
    }
}
