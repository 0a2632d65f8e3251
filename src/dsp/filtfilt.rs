//! Zero-phase (forward-backward) filtering
//!
//! A causal IIR filter shifts the phase of everything it passes; running
//! the filter forward and then backward over the whole signal cancels the
//! shift exactly. Zero phase is what keeps each band's envelope aligned
//! with its carrier band, so the analysis and synthesis passes must both
//! go through this one implementation.
//!
//! Edge handling follows the standard recipe: the signal is extended at
//! both ends by an odd reflection, and each pass starts from the filter's
//! steady-state initial conditions scaled by the first sample, so a step
//! input produces no startup transient.

use crate::dsp::butterworth::BandpassFilter;
use crate::error::VocoderError;

/// Apply an IIR filter once, causally (direct form II transposed)
///
/// `zi` is the initial delay-line state; pass zeros for a cold start.
fn lfilter(b: &[f64], a: &[f64], x: &[f64], zi: &[f64]) -> Vec<f64> {
    let order = b.len() - 1;
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(zi.len(), order);

    let mut z = zi.to_vec();
    let mut y = Vec::with_capacity(x.len());
    for &xn in x {
        let yn = b[0] * xn + z[0];
        for j in 0..order - 1 {
            z[j] = b[j + 1] * xn + z[j + 1] - a[j + 1] * yn;
        }
        z[order - 1] = b[order] * xn - a[order] * yn;
        y.push(yn);
    }
    y
}

/// Steady-state initial conditions for `lfilter`
///
/// Solves `(I - A^T) zi = B` where `A` is the companion matrix of `a`,
/// so that filtering a constant signal scaled by `zi` produces no
/// transient.
fn lfilter_zi(b: &[f64], a: &[f64]) -> Vec<f64> {
    let n = b.len() - 1;

    // I - companion(a)^T
    let mut m = vec![vec![0.0f64; n]; n];
    for (i, row) in m.iter_mut().enumerate() {
        row[i] = 1.0;
        // companion(a)[0][i] = -a[i+1]; companion(a)[j][j-1] = 1
        row[0] += a[i + 1];
        if i + 1 < n {
            row[i + 1] -= 1.0;
        }
    }

    let mut rhs: Vec<f64> = (0..n).map(|i| b[i + 1] - a[i + 1] * b[0]).collect();

    // Gaussian elimination with partial pivoting.
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&r1, &r2| m[r1][col].abs().partial_cmp(&m[r2][col].abs()).unwrap())
            .unwrap();
        m.swap(col, pivot);
        rhs.swap(col, pivot);
        let diag = m[col][col];
        for row in col + 1..n {
            let factor = m[row][col] / diag;
            for k in col..n {
                m[row][k] -= factor * m[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }
    let mut zi = vec![0.0f64; n];
    for row in (0..n).rev() {
        let mut acc = rhs[row];
        for col in row + 1..n {
            acc -= m[row][col] * zi[col];
        }
        zi[row] = acc / m[row][row];
    }
    zi
}

/// Filter a signal forward and backward for zero phase distortion
///
/// # Arguments
///
/// * `filter` - Band-pass coefficients from `design_bandpass`
/// * `x` - Input signal
///
/// # Returns
///
/// Filtered signal of the same length as `x`.
///
/// # Errors
///
/// Returns `InvalidInput` if the signal is not longer than the edge
/// padding (3x the tap count).
pub fn filtfilt(filter: &BandpassFilter, x: &[f32]) -> Result<Vec<f32>, VocoderError> {
    let b = &filter.b;
    let a = &filter.a;
    let pad = 3 * b.len().max(a.len());

    if x.len() <= pad {
        return Err(VocoderError::InvalidInput(format!(
            "signal of {} samples is too short for zero-phase filtering (needs > {})",
            x.len(),
            pad
        )));
    }

    // Odd extension: reflect about the end samples so the signal value and
    // slope are continuous across the splice.
    let n = x.len();
    let mut ext = Vec::with_capacity(n + 2 * pad);
    let first = x[0] as f64;
    let last = x[n - 1] as f64;
    for i in (1..=pad).rev() {
        ext.push(2.0 * first - x[i] as f64);
    }
    ext.extend(x.iter().map(|&s| s as f64));
    for i in 1..=pad {
        ext.push(2.0 * last - x[n - 1 - i] as f64);
    }

    let zi = lfilter_zi(b, a);

    let zi_fwd: Vec<f64> = zi.iter().map(|&z| z * ext[0]).collect();
    let mut y = lfilter(b, a, &ext, &zi_fwd);

    y.reverse();
    let zi_bwd: Vec<f64> = zi.iter().map(|&z| z * y[0]).collect();
    let mut y = lfilter(b, a, &y, &zi_bwd);
    y.reverse();

    Ok(y[pad..pad + n].iter().map(|&s| s as f32).collect())
}
