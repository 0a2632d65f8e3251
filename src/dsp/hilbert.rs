//! Analytic-signal envelope extraction
//!
//! The amplitude envelope of a band is the magnitude of its analytic
//! signal, computed by zeroing the negative-frequency half of the
//! spectrum and doubling the positive half (FFT-based Hilbert transform).

use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;

/// Compute the analytic-signal magnitude of a real signal
///
/// # Arguments
///
/// * `x` - Real input signal
///
/// # Returns
///
/// Non-negative envelope, same length as `x`.
pub fn envelope(x: &[f32]) -> Vec<f32> {
    let n = x.len();
    if n == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let ifft = planner.plan_fft_inverse(n);

    let mut buf: Vec<Complex64> = x.iter().map(|&s| Complex64::new(s as f64, 0.0)).collect();
    fft.process(&mut buf);

    // One-sided spectrum: keep DC (and Nyquist for even lengths), double
    // the positive frequencies, zero the negative ones.
    let half = n / 2;
    if n % 2 == 0 {
        for value in buf.iter_mut().take(half).skip(1) {
            *value *= 2.0;
        }
        for value in buf.iter_mut().skip(half + 1) {
            *value = Complex64::new(0.0, 0.0);
        }
    } else {
        for value in buf.iter_mut().take(half + 1).skip(1) {
            *value *= 2.0;
        }
        for value in buf.iter_mut().skip(half + 1) {
            *value = Complex64::new(0.0, 0.0);
        }
    }

    ifft.process(&mut buf);

    // rustfft's inverse transform is unnormalized.
    let scale = 1.0 / n as f64;
    buf.iter().map(|c| (c.norm() * scale) as f32).collect()
}
